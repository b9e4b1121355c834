pub const CONSTANT_UTF8: u8 = 1;
pub const CONSTANT_CLASS: u8 = 7;
pub const CONSTANT_METHODREF: u8 = 10;
pub const CONSTANT_NAME_AND_TYPE: u8 = 12;

/// Entries indexed from 1; index 0 is never valid.
#[derive(Debug, Default, PartialEq)]
pub struct ConstantPool {
    cp_infos: Vec<CpInfo>,
}
impl ConstantPool {
    pub fn new(cp_infos: Vec<CpInfo>) -> Self {
        Self { cp_infos }
    }

    pub fn get(&self, index: u16) -> Option<&CpInfo> {
        self.cp_infos.get((index as usize).checked_sub(1)?)
    }

    /// The `constant_pool_count` this pool was read with.
    pub fn count(&self) -> usize {
        self.cp_infos.len() + 1
    }

    pub fn len(&self) -> usize {
        self.cp_infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cp_infos.is_empty()
    }
}
impl<'a> IntoIterator for &'a ConstantPool {
    type Item = &'a CpInfo;
    type IntoIter = std::slice::Iter<'a, CpInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.cp_infos.iter()
    }
}

#[macro_export]
macro_rules! matches_cp_info {
    ($cp:expr, $index:expr, $i:ident) => {{
        let index: u16 = $index;
        match $cp.get(index) {
            Some($crate::constant_pool::CpInfo::$i(n)) => Ok(n),
            Some(c) => Err($crate::ClassFileError::UnexpectedConstantPoolEntry(
                stringify!($i),
                index,
                c.clone(),
            )),
            None => Err($crate::ClassFileError::InvalidConstantPoolIndex(index)),
        }
    }};
}

#[derive(Debug, PartialEq, Clone)]
pub enum CpInfo {
    Utf8(String),
    Class(ClassInfo),
    MethodRef(RefInfo),
    NameAndType(NameAndTypeInfo),
}

#[derive(Debug, PartialEq, Clone)]
pub struct ClassInfo {
    // Must point at a Utf8 entry holding the binary name in internal form.
    pub name_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct RefInfo {
    pub class_index: u16,
    pub name_and_type_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct NameAndTypeInfo {
    pub name_index: u16,
    pub descriptor_index: u16,
}
