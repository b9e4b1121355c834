use std::io::Read;

use crate::{
    attributes::Attributes, constant_pool::ClassInfo, matches_cp_info, AccessFlags, ClassShape,
    ConstantPool, Result,
};

/// A class file whose layout matched a [`ClassShape`].
#[derive(Debug, PartialEq)]
pub struct ClassFile {
    /// `(major, minor)`
    pub version: (u16, u16),
    pub constant_pool: ConstantPool,
    pub access_flags: AccessFlags,
    pub this_class: u16,
    pub super_class: u16,
    pub interfaces_count: u16,
    pub fields_count: u16,
    pub methods: Vec<MethodInfo>,
    pub attributes: Attributes,
}
impl ClassFile {
    /// Reads `bytes` against the default shape: one public no-argument constructor.
    pub fn parse(bytes: impl Read) -> Result<ClassFile> {
        ClassShape::default().read(bytes)
    }

    pub fn class_name(&self) -> Result<&str> {
        let ClassInfo { name_index } =
            matches_cp_info!(self.constant_pool, self.this_class, Class)?;

        Ok(matches_cp_info!(self.constant_pool, *name_index, Utf8)?)
    }

    pub fn super_class(&self) -> Result<&str> {
        let ClassInfo { name_index } =
            matches_cp_info!(self.constant_pool, self.super_class, Class)?;

        Ok(matches_cp_info!(self.constant_pool, *name_index, Utf8)?)
    }

    pub fn method_name(&self, method: &MethodInfo) -> Result<&str> {
        Ok(matches_cp_info!(
            self.constant_pool,
            method.name_index,
            Utf8
        )?)
    }

    pub fn method_descriptor(&self, method: &MethodInfo) -> Result<&str> {
        Ok(matches_cp_info!(
            self.constant_pool,
            method.descriptor_index,
            Utf8
        )?)
    }

    pub fn source_file(&self) -> Result<Option<&str>> {
        let Some(sourcefile_index) = self.attributes.sourcefile_index() else {
            return Ok(None);
        };

        Ok(Some(matches_cp_info!(
            self.constant_pool,
            sourcefile_index,
            Utf8
        )?))
    }
}

#[derive(Debug, PartialEq)]
pub struct MethodInfo {
    pub access_flags: AccessFlags,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub attributes: Attributes,
}
