use std::io::{self, BufReader, Read};

use byteorder::{BigEndian, ReadBytesExt};

use crate::{
    attributes::{self, Attribute, Attributes, CodeAttribute, ExceptionTableEntry},
    class_file::MethodInfo,
    constant_pool::{self, CpInfo},
};

use super::*;

type Endian = BigEndian;

pub const HEADER_LENGTH: usize = 8;

/// Sequential big-endian reader over one class file. The steps are public so a caller can check
/// each field as soon as it has been decoded.
pub struct Parser<R> {
    r: BufReader<R>,
}
impl<R: Read> Parser<R> {
    pub fn new(r: R) -> Self {
        Self {
            r: BufReader::new(r),
        }
    }

    /// Magic identifier followed by minor and major version.
    pub fn parse_header(&mut self) -> Result<[u8; HEADER_LENGTH]> {
        let mut header = [0u8; HEADER_LENGTH];
        self.r.read_exact(&mut header)?;
        Ok(header)
    }

    pub fn parse_constant_pool(&mut self, constant_pool_count: u16) -> Result<ConstantPool> {
        let mut res = Vec::with_capacity(constant_pool_count.saturating_sub(1) as usize);
        for index in 1..constant_pool_count {
            let cp_info = self.parse_cp_info()?;
            log::debug!("{}: {:?}", index, cp_info);
            res.push(cp_info);
        }
        Ok(ConstantPool::new(res))
    }

    fn parse_cp_info(&mut self) -> Result<CpInfo> {
        let tag = self.read_u8()?;
        match tag {
            constant_pool::CONSTANT_UTF8 => self.parse_utf8(),
            constant_pool::CONSTANT_CLASS => self.parse_class_info(),
            constant_pool::CONSTANT_METHODREF => self.parse_method_ref(),
            constant_pool::CONSTANT_NAME_AND_TYPE => self.parse_name_and_type_info(),
            _ => Err(ClassFileError::InvalidCpInfoTag(tag)),
        }
    }

    fn parse_utf8(&mut self) -> Result<CpInfo> {
        let length = self.read_u16()?;
        let bytes = self.read_bytes(length as u32)?;

        let s = cesu8::from_java_cesu8(&bytes).map_err(|_| ClassFileError::InvalidUtf8)?;
        Ok(CpInfo::Utf8(s.into_owned()))
    }

    fn parse_class_info(&mut self) -> Result<CpInfo> {
        let name_index = self.read_u16()?;

        Ok(CpInfo::Class(constant_pool::ClassInfo { name_index }))
    }

    fn parse_method_ref(&mut self) -> Result<CpInfo> {
        let class_index = self.read_u16()?;
        let name_and_type_index = self.read_u16()?;

        Ok(CpInfo::MethodRef(constant_pool::RefInfo {
            class_index,
            name_and_type_index,
        }))
    }

    fn parse_name_and_type_info(&mut self) -> Result<CpInfo> {
        let name_index = self.read_u16()?;
        let descriptor_index = self.read_u16()?;

        Ok(CpInfo::NameAndType(constant_pool::NameAndTypeInfo {
            name_index,
            descriptor_index,
        }))
    }

    pub fn parse_method_info(&mut self, constant_pool: &ConstantPool) -> Result<MethodInfo> {
        let access_flags = AccessFlags::from_bits_truncate(self.read_u16()?);
        let name_index = self.read_u16()?;
        let descriptor_index = self.read_u16()?;
        let attributes_count = self.read_u16()?;
        log::debug!(
            "method access_flags={:?} name_index={} descriptor_index={} attributes_count={}",
            access_flags,
            name_index,
            descriptor_index,
            attributes_count
        );
        let attributes = self.parse_attributes(attributes_count, constant_pool)?;

        Ok(MethodInfo {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
        })
    }

    pub fn parse_attribute(&mut self, constant_pool: &ConstantPool) -> Result<Attribute> {
        self.parse_attribute_in(constant_pool, false)
    }

    /// Attributes of a Code attribute may not hold another Code attribute.
    fn parse_attribute_in(
        &mut self,
        constant_pool: &ConstantPool,
        inside_code: bool,
    ) -> Result<Attribute> {
        let attribute_name_index = self.read_u16()?;
        let attribute_length = self.read_u32()?;
        let name = matches_cp_info!(constant_pool, attribute_name_index, Utf8)?;
        log::debug!(
            "attribute {} (attribute_name_index={}, attribute_length={})",
            name,
            attribute_name_index,
            attribute_length
        );

        let attribute = match name.as_str() {
            attributes::CODE if inside_code => return Err(ClassFileError::NestedCodeAttribute),
            attributes::CODE => Attribute::Code(self.parse_code_attribute(constant_pool)?),
            attributes::SOURCE_FILE => {
                if attribute_length != 2 {
                    return Err(ClassFileError::InvalidAttributeLength {
                        name: attributes::SOURCE_FILE,
                        expected: 2,
                        actual: attribute_length,
                    });
                }
                Attribute::SourceFile {
                    sourcefile_index: self.read_u16()?,
                }
            }
            attributes::LINE_NUMBER_TABLE => {
                self.skip(attribute_length)?;
                Attribute::LineNumberTable {
                    length: attribute_length,
                }
            }
            attributes::LOCAL_VARIABLE_TABLE => {
                self.skip(attribute_length)?;
                Attribute::LocalVariableTable {
                    length: attribute_length,
                }
            }
            _ => return Err(ClassFileError::UnknownAttribute(name.clone())),
        };
        log::debug!("\t{:?}", attribute);

        Ok(attribute)
    }

    fn parse_code_attribute(&mut self, constant_pool: &ConstantPool) -> Result<CodeAttribute> {
        let max_stack = self.read_u16()?;
        let max_locals = self.read_u16()?;
        let code_length = self.read_u32()?;
        let code = self.read_bytes(code_length)?;
        let exception_table_length = self.read_u16()?;
        let exception_table = (0..exception_table_length)
            .map(|_| self.parse_exception_table_entry())
            .collect::<Result<Vec<_>>>()?;
        let attributes_count = self.read_u16()?;
        let attributes = (0..attributes_count)
            .map(|_| self.parse_attribute_in(constant_pool, true))
            .collect::<Result<Vec<_>>>()
            .map(Attributes)?;

        Ok(CodeAttribute {
            max_stack,
            max_locals,
            code,
            exception_table,
            attributes,
        })
    }

    fn parse_exception_table_entry(&mut self) -> Result<ExceptionTableEntry> {
        let start_pc = self.read_u16()?;
        let end_pc = self.read_u16()?;
        let handler_pc = self.read_u16()?;
        let catch_type = self.read_u16()?;

        Ok(ExceptionTableEntry {
            start_pc,
            end_pc,
            handler_pc,
            catch_type,
        })
    }

    pub fn parse_attributes(
        &mut self,
        attributes_count: u16,
        constant_pool: &ConstantPool,
    ) -> Result<Attributes> {
        (0..attributes_count)
            .map(|_| self.parse_attribute(constant_pool))
            .collect::<Result<Vec<_>>>()
            .map(Attributes)
    }

    /// Reads `length` bytes without allocating more than is actually available.
    fn read_bytes(&mut self, length: u32) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let read = self.r.by_ref().take(length as u64).read_to_end(&mut bytes)?;
        if read < length as usize {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        Ok(bytes)
    }

    fn skip(&mut self, length: u32) -> Result<()> {
        let skipped = io::copy(&mut self.r.by_ref().take(length as u64), &mut io::sink())?;
        if skipped < length as u64 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        Ok(())
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(self.r.read_u32::<Endian>()?)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(self.r.read_u16::<Endian>()?)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.r.read_u8()?)
    }
}
