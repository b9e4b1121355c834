use thiserror::Error;

use crate::constant_pool;

#[derive(Error, Debug)]
pub enum ClassFileError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error("Class not found: {0}")]
    ClassNotFound(String),
    #[error("Unexpected header: expected {expected:02X?}, found {actual:02X?}")]
    UnexpectedHeader { expected: [u8; 8], actual: [u8; 8] },
    #[error("Unexpected {field}: expected {expected}, found {actual}")]
    Mismatch {
        field: &'static str,
        expected: String,
        actual: String,
    },
    #[error("Invalid cp info tag: {0}")]
    InvalidCpInfoTag(u8),
    #[error("Invalid constant pool index: {0}")]
    InvalidConstantPoolIndex(u16),
    #[error("Expected {0} at constant pool index {1}, found {2:?}")]
    UnexpectedConstantPoolEntry(&'static str, u16, constant_pool::CpInfo),
    #[error("Invalid modified UTF-8 string in constant pool")]
    InvalidUtf8,
    #[error("Code attribute nested inside a Code attribute")]
    NestedCodeAttribute,
    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),
    #[error("Invalid {name} attribute length: expected {expected}, found {actual}")]
    InvalidAttributeLength {
        name: &'static str,
        expected: u32,
        actual: u32,
    },
}
