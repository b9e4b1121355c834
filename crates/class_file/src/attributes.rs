pub const CODE: &str = "Code";
pub const SOURCE_FILE: &str = "SourceFile";
pub const LINE_NUMBER_TABLE: &str = "LineNumberTable";
pub const LOCAL_VARIABLE_TABLE: &str = "LocalVariableTable";

#[derive(Debug, PartialEq)]
pub enum Attribute {
    Code(CodeAttribute),
    SourceFile { sourcefile_index: u16 },
    /// Debug-only tables are skipped; only their length is kept.
    LineNumberTable { length: u32 },
    LocalVariableTable { length: u32 },
}
impl Attribute {
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Code(_) => CODE,
            Attribute::SourceFile { .. } => SOURCE_FILE,
            Attribute::LineNumberTable { .. } => LINE_NUMBER_TABLE,
            Attribute::LocalVariableTable { .. } => LOCAL_VARIABLE_TABLE,
        }
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct Attributes(pub Vec<Attribute>);
impl Attributes {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.0.iter()
    }

    pub fn code_attribute(&self) -> Option<&CodeAttribute> {
        self.0.iter().find_map(|a| match a {
            Attribute::Code(code) => Some(code),
            _ => None,
        })
    }

    pub fn sourcefile_index(&self) -> Option<u16> {
        self.0.iter().find_map(|a| match a {
            Attribute::SourceFile { sourcefile_index } => Some(*sourcefile_index),
            _ => None,
        })
    }
}

#[derive(Debug, PartialEq)]
pub struct ExceptionTableEntry {
    pub start_pc: u16,
    pub end_pc: u16,
    pub handler_pc: u16,
    pub catch_type: u16,
}

#[derive(Debug, PartialEq)]
pub struct CodeAttribute {
    pub max_stack: u16,
    pub max_locals: u16,
    pub code: Vec<u8>,
    pub exception_table: Vec<ExceptionTableEntry>,
    pub attributes: Attributes,
}
