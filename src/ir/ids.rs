//! Newtype IDs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer class index used by YOLO label files.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(pub u32);

impl ClassId {
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ClassId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_id_displays_as_bare_integer() {
        assert_eq!(ClassId::new(7).to_string(), "7");
        assert_eq!(format!("{:?}", ClassId::new(7)), "ClassId(7)");
    }

    #[test]
    fn class_id_serializes_transparently() {
        let json = serde_json::to_string(&ClassId::new(3)).unwrap();
        assert_eq!(json, "3");
        let back: ClassId = serde_json::from_str("3").unwrap();
        assert_eq!(back, ClassId::new(3));
    }
}
