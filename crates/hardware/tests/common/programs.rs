use mipsim_core::core::arch::Reg;
use mipsim_core::isa::encode::{add, addi, bne, end, li, lw, print, sw};

/// `t3 = 5 + 7`, stored to and reloaded from address 20, then printed.
pub fn store_load_print() -> Vec<u32> {
    vec![
        li(Reg::T1, 5),
        li(Reg::T2, 7),
        add(Reg::T3, Reg::T1, Reg::T2),
        sw(Reg::T3, Reg::Zero, 20),
        lw(Reg::T4, Reg::Zero, 20),
        print(Reg::T4),
        end(),
    ]
}

/// `n` increments of `t0` followed by `END`.
pub fn straight_line(n: usize) -> Vec<u32> {
    let mut words = vec![addi(Reg::T0, Reg::T0, 1); n];
    words.push(end());
    words
}

/// Counts `t0` up to `limit` in a two-instruction loop, then prints it.
pub fn count_to(limit: i16) -> Vec<u32> {
    vec![
        li(Reg::T0, 0),
        li(Reg::T1, limit),
        addi(Reg::T0, Reg::T0, 1),
        bne(Reg::T0, Reg::T1, -2),
        print(Reg::T0),
        end(),
    ]
}
