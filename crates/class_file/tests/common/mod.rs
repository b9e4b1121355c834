#![allow(dead_code)]

use byteorder::{BigEndian, WriteBytesExt};

pub enum Constant {
    Utf8(&'static str),
    Class(u16),
    MethodRef(u16, u16),
    NameAndType(u16, u16),
    /// A bare tag byte with no payload.
    Tag(u8),
}

pub struct RawAttribute {
    pub name_index: u16,
    pub info: Vec<u8>,
}

/// Byte-level description of `my.EmptyClass`, a class with nothing but the implicit constructor,
/// laid out the way javac emits it.
pub struct ClassBytes {
    pub header: [u8; 8],
    pub constant_pool: Vec<Constant>,
    pub access_flags: u16,
    pub this_class: u16,
    pub super_class: u16,
    pub interfaces_count: u16,
    pub fields_count: u16,
    pub methods_count: u16,
    pub method_access_flags: u16,
    pub method_name_index: u16,
    pub method_descriptor_index: u16,
    pub method_attributes: Vec<RawAttribute>,
    pub class_attributes: Vec<RawAttribute>,
}

pub const CODE: [u8; 5] = [0x2a, 0xb7, 0x00, 0x01, 0xb1];

impl ClassBytes {
    pub fn empty_class() -> Self {
        Self {
            header: [0xca, 0xfe, 0xba, 0xbe, 0x00, 0x00, 0x00, 0x31],
            constant_pool: vec![
                Constant::MethodRef(3, 13),
                Constant::Class(14),
                Constant::Class(15),
                Constant::Utf8("<init>"),
                Constant::Utf8("()V"),
                Constant::Utf8("Code"),
                Constant::Utf8("LineNumberTable"),
                Constant::Utf8("LocalVariableTable"),
                Constant::Utf8("this"),
                Constant::Utf8("Lmy/EmptyClass;"),
                Constant::Utf8("SourceFile"),
                Constant::Utf8("EmptyClass.java"),
                Constant::NameAndType(4, 5),
                Constant::Utf8("my/EmptyClass"),
                Constant::Utf8("java/lang/Object"),
            ],
            access_flags: 0x0021,
            this_class: 2,
            super_class: 3,
            interfaces_count: 0,
            fields_count: 0,
            methods_count: 1,
            method_access_flags: 0x0001,
            method_name_index: 4,
            method_descriptor_index: 5,
            method_attributes: vec![code_attribute(
                &CODE,
                &[],
                vec![line_number_table(), local_variable_table()],
            )],
            class_attributes: vec![source_file(12)],
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut w = Vec::new();
        w.extend_from_slice(&self.header);
        w.write_u16::<BigEndian>(self.constant_pool.len() as u16 + 1)
            .unwrap();
        for constant in &self.constant_pool {
            write_constant(&mut w, constant);
        }
        for value in [
            self.access_flags,
            self.this_class,
            self.super_class,
            self.interfaces_count,
            self.fields_count,
            self.methods_count,
            self.method_access_flags,
            self.method_name_index,
            self.method_descriptor_index,
        ] {
            w.write_u16::<BigEndian>(value).unwrap();
        }
        write_attributes(&mut w, &self.method_attributes);
        write_attributes(&mut w, &self.class_attributes);
        w
    }
}

fn write_constant(w: &mut Vec<u8>, constant: &Constant) {
    match *constant {
        Constant::Utf8(s) => {
            w.write_u8(1).unwrap();
            w.write_u16::<BigEndian>(s.len() as u16).unwrap();
            w.extend_from_slice(s.as_bytes());
        }
        Constant::Class(name_index) => {
            w.write_u8(7).unwrap();
            w.write_u16::<BigEndian>(name_index).unwrap();
        }
        Constant::MethodRef(class_index, name_and_type_index) => {
            w.write_u8(10).unwrap();
            w.write_u16::<BigEndian>(class_index).unwrap();
            w.write_u16::<BigEndian>(name_and_type_index).unwrap();
        }
        Constant::NameAndType(name_index, descriptor_index) => {
            w.write_u8(12).unwrap();
            w.write_u16::<BigEndian>(name_index).unwrap();
            w.write_u16::<BigEndian>(descriptor_index).unwrap();
        }
        Constant::Tag(tag) => w.write_u8(tag).unwrap(),
    }
}

fn write_attributes(w: &mut Vec<u8>, attributes: &[RawAttribute]) {
    w.write_u16::<BigEndian>(attributes.len() as u16).unwrap();
    for attribute in attributes {
        w.write_u16::<BigEndian>(attribute.name_index).unwrap();
        w.write_u32::<BigEndian>(attribute.info.len() as u32)
            .unwrap();
        w.extend_from_slice(&attribute.info);
    }
}

pub fn code_attribute(
    code: &[u8],
    exception_table: &[[u16; 4]],
    attributes: Vec<RawAttribute>,
) -> RawAttribute {
    let mut info = Vec::new();
    info.write_u16::<BigEndian>(1).unwrap(); // max_stack
    info.write_u16::<BigEndian>(1).unwrap(); // max_locals
    info.write_u32::<BigEndian>(code.len() as u32).unwrap();
    info.extend_from_slice(code);
    info.write_u16::<BigEndian>(exception_table.len() as u16)
        .unwrap();
    for entry in exception_table {
        for value in entry {
            info.write_u16::<BigEndian>(*value).unwrap();
        }
    }
    write_attributes(&mut info, &attributes);

    RawAttribute {
        name_index: 6,
        info,
    }
}

pub fn line_number_table() -> RawAttribute {
    RawAttribute {
        name_index: 7,
        // one entry: start_pc 0, line 3
        info: vec![0x00, 0x01, 0x00, 0x00, 0x00, 0x03],
    }
}

pub fn local_variable_table() -> RawAttribute {
    RawAttribute {
        name_index: 8,
        // one entry: `this` over the whole body, slot 0
        info: vec![
            0x00, 0x01, 0x00, 0x00, 0x00, 0x05, 0x00, 0x09, 0x00, 0x0a, 0x00, 0x00,
        ],
    }
}

pub fn source_file(sourcefile_index: u16) -> RawAttribute {
    RawAttribute {
        name_index: 11,
        info: sourcefile_index.to_be_bytes().to_vec(),
    }
}
