use std::{
    env,
    fs::File,
    path::{Path, PathBuf},
};

use crate::{ClassFile, ClassFileError, ClassShape, Result};

pub const CLASSPATH_VAR: &str = "CLASSPATH";

/// `org.example.Foo` -> `org/example/Foo.class`
pub fn resource_name(class_name: &str) -> String {
    format!("{}.class", class_name.replace('.', "/"))
}

/// Ordered list of directories searched for class files.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassPath {
    roots: Vec<PathBuf>,
}
impl ClassPath {
    pub fn new<P: Into<PathBuf>>(roots: impl IntoIterator<Item = P>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Roots from `CLASSPATH`, or the current directory if it is unset.
    pub fn from_env() -> Self {
        match env::var_os(CLASSPATH_VAR) {
            Some(paths) => Self::new(env::split_paths(&paths)),
            None => Self::new([PathBuf::from(".")]),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn find(&self, class_name: &str) -> Option<PathBuf> {
        let resource = resource_name(class_name);
        self.roots
            .iter()
            .map(|root| root.join(&resource))
            .find(|path| path.is_file())
    }

    pub fn open(&self, class_name: &str) -> Result<File> {
        let path = self
            .find(class_name)
            .ok_or_else(|| ClassFileError::ClassNotFound(class_name.to_owned()))?;
        log::debug!("reading {} from {}", class_name, path.display());

        Ok(File::open(path)?)
    }

    pub fn read_class(&self, class_name: &str, shape: &ClassShape) -> Result<ClassFile> {
        shape.read(self.open(class_name)?)
    }
}
impl<P: AsRef<Path>> FromIterator<P> for ClassPath {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|p| p.as_ref().to_path_buf()))
    }
}
