// https://docs.oracle.com/javase/specs/jvms/se19/html/jvms-4.html

mod access_flags;
pub mod attributes;
mod class_file;
mod class_path;
#[macro_use]
pub mod constant_pool;
mod error;
mod parser;
mod shape;

pub use self::class_file::{ClassFile, MethodInfo};
pub use access_flags::AccessFlags;
pub use class_path::{resource_name, ClassPath};
pub use constant_pool::ConstantPool;
pub use error::ClassFileError;
pub use parser::Parser;
pub use shape::{ClassShape, ConstructorShape};

pub type Result<T, E = ClassFileError> = std::result::Result<T, E>;
