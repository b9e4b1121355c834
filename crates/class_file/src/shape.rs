use std::{fmt, io::Read};

use byteorder::{BigEndian, ByteOrder};

use crate::{
    attributes::{self, Attribute, CodeAttribute},
    parser::HEADER_LENGTH,
    AccessFlags, ClassFile, ClassFileError, MethodInfo, Parser, Result,
};

const MAGIC: u32 = 0xCAFEBABE;

const ALOAD_0: u8 = 0x2a;
const INVOKESPECIAL: u8 = 0xb7;
const RETURN: u8 = 0xb1;

/// Every value a class file must carry to be accepted. The class has no interfaces, no fields and
/// exactly one method, a constructor, followed by a single `SourceFile` attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassShape {
    pub major_version: u16,
    pub minor_version: u16,
    pub constant_pool_count: u16,
    pub access_flags: AccessFlags,
    pub this_class: u16,
    pub super_class: u16,
    pub constructor: ConstructorShape,
    pub sourcefile_index: u16,
}

/// A constructor whose body is `aload_0; invokespecial #super_constructor_index; return`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorShape {
    pub access_flags: AccessFlags,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub max_stack: u16,
    pub max_locals: u16,
    pub super_constructor_index: u16,
    /// `LineNumberTable` and `LocalVariableTable`
    pub code_attributes_count: u16,
}

impl Default for ClassShape {
    fn default() -> Self {
        Self {
            major_version: 49,
            minor_version: 0,
            constant_pool_count: 16,
            access_flags: AccessFlags::PUBLIC | AccessFlags::SUPER,
            this_class: 2,
            super_class: 3,
            constructor: ConstructorShape::default(),
            sourcefile_index: 12,
        }
    }
}

impl Default for ConstructorShape {
    fn default() -> Self {
        Self {
            access_flags: AccessFlags::PUBLIC,
            name_index: 4,
            descriptor_index: 5,
            max_stack: 1,
            max_locals: 1,
            super_constructor_index: 1,
            code_attributes_count: 2,
        }
    }
}

impl ClassShape {
    pub fn header(&self) -> [u8; HEADER_LENGTH] {
        let mut header = [0u8; HEADER_LENGTH];
        BigEndian::write_u32(&mut header[0..4], MAGIC);
        BigEndian::write_u16(&mut header[4..6], self.minor_version);
        BigEndian::write_u16(&mut header[6..8], self.major_version);
        header
    }

    /// Reads one class file, failing on the first field that differs from this shape. `r` is
    /// dropped before returning.
    pub fn read(&self, r: impl Read) -> Result<ClassFile> {
        let mut parser = Parser::new(r);

        let header = parser.parse_header()?;
        let expected = self.header();
        if header != expected {
            return Err(ClassFileError::UnexpectedHeader {
                expected,
                actual: header,
            });
        }

        let constant_pool_count = parser.read_u16()?;
        expect(
            "constant_pool_count",
            self.constant_pool_count,
            constant_pool_count,
        )?;
        let constant_pool = parser.parse_constant_pool(constant_pool_count)?;

        let access_flags = AccessFlags::from_bits_truncate(parser.read_u16()?);
        expect("access_flags", self.access_flags, access_flags)?;
        let this_class = parser.read_u16()?;
        expect("this_class", self.this_class, this_class)?;
        let super_class = parser.read_u16()?;
        expect("super_class", self.super_class, super_class)?;
        let interfaces_count = parser.read_u16()?;
        expect("interfaces_count", 0, interfaces_count)?;
        let fields_count = parser.read_u16()?;
        expect("fields_count", 0, fields_count)?;
        let methods_count = parser.read_u16()?;
        expect("methods_count", 1, methods_count)?;

        let method = parser.parse_method_info(&constant_pool)?;
        self.constructor.check(&method)?;

        let attributes_count = parser.read_u16()?;
        expect("attributes_count", 1, attributes_count)?;
        let attributes = parser.parse_attributes(attributes_count, &constant_pool)?;
        match attributes.0.first() {
            Some(Attribute::SourceFile { sourcefile_index }) => {
                expect("sourcefile_index", self.sourcefile_index, *sourcefile_index)?
            }
            other => {
                return Err(unexpected_attribute(
                    "attributes[0]",
                    attributes::SOURCE_FILE,
                    other,
                ))
            }
        }

        Ok(ClassFile {
            version: (self.major_version, self.minor_version),
            constant_pool,
            access_flags,
            this_class,
            super_class,
            interfaces_count,
            fields_count,
            methods: vec![method],
            attributes,
        })
    }
}

impl ConstructorShape {
    fn check(&self, method: &MethodInfo) -> Result<()> {
        expect("method access_flags", self.access_flags, method.access_flags)?;
        expect("method name_index", self.name_index, method.name_index)?;
        expect(
            "method descriptor_index",
            self.descriptor_index,
            method.descriptor_index,
        )?;
        expect("method attributes_count", 1, method.attributes.len())?;

        match method.attributes.0.first() {
            Some(Attribute::Code(code)) => self.check_code(code),
            other => Err(unexpected_attribute(
                "method attributes[0]",
                attributes::CODE,
                other,
            )),
        }
    }

    fn check_code(&self, code: &CodeAttribute) -> Result<()> {
        expect("max_stack", self.max_stack, code.max_stack)?;
        expect("max_locals", self.max_locals, code.max_locals)?;
        expect("code_length", 5, code.code.len())?;
        expect("exception_table_length", 0, code.exception_table.len())?;
        expect(
            "code attributes_count",
            self.code_attributes_count as usize,
            code.attributes.len(),
        )?;

        expect("code[0]", Opcode(ALOAD_0), Opcode(code.code[0]))?;
        expect("code[1]", Opcode(INVOKESPECIAL), Opcode(code.code[1]))?;
        expect(
            "invokespecial index",
            self.super_constructor_index,
            BigEndian::read_u16(&code.code[2..4]),
        )?;
        expect("code[4]", Opcode(RETURN), Opcode(code.code[4]))?;

        Ok(())
    }
}

fn expect<T: PartialEq + fmt::Debug>(field: &'static str, expected: T, actual: T) -> Result<()> {
    if expected == actual {
        return Ok(());
    }
    Err(ClassFileError::Mismatch {
        field,
        expected: format!("{:?}", expected),
        actual: format!("{:?}", actual),
    })
}

fn unexpected_attribute(
    field: &'static str,
    expected: &'static str,
    actual: Option<&Attribute>,
) -> ClassFileError {
    ClassFileError::Mismatch {
        field,
        expected: expected.to_owned(),
        actual: actual.map_or("nothing", Attribute::name).to_owned(),
    }
}

#[derive(PartialEq)]
struct Opcode(u8);
impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ALOAD_0 => write!(f, "aload_0 (0x{:02X})", self.0),
            INVOKESPECIAL => write!(f, "invokespecial (0x{:02X})", self.0),
            RETURN => write!(f, "return (0x{:02X})", self.0),
            op => write!(f, "0x{:02X}", op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_encode_the_header() {
        assert_eq!(
            ClassShape::default().header(),
            [0xca, 0xfe, 0xba, 0xbe, 0x00, 0x00, 0x00, 0x31]
        );
    }

    #[test]
    fn it_should_report_expected_and_actual() {
        let err = expect("this_class", 2u16, 7).unwrap_err();
        assert_eq!(err.to_string(), "Unexpected this_class: expected 2, found 7");
    }

    #[test]
    fn it_should_name_opcodes() {
        let err = expect("code[4]", Opcode(RETURN), Opcode(0xb0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unexpected code[4]: expected return (0xB1), found 0xB0"
        );
    }
}
