/// Field extraction and mnemonic classification.
pub mod decode;
