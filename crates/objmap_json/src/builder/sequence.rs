use core::any::Any;

use objmap_reflect::Value;
use objmap_reflect::info::{SequenceInfo, TypeInfo};

use crate::MapError;
use crate::builder::ObjectBuilder;

// -----------------------------------------------------------------------------
// SequenceBuilder

/// Builder for homogeneous, ordered collections.
///
/// The member key is ignored: every element has the one type bound at
/// builder-construction time.
pub struct SequenceBuilder {
    info: &'static SequenceInfo,
}

impl SequenceBuilder {
    pub fn new(info: &'static SequenceInfo) -> Self {
        Self { info }
    }
}

impl ObjectBuilder for SequenceBuilder {
    fn member_type(&self, _key: &str) -> Result<&'static TypeInfo, MapError> {
        Ok(self.info.element())
    }

    fn create(&self) -> Box<dyn Any> {
        self.info.new_accumulator()
    }

    fn incorporate(
        &self,
        instance: &mut dyn Any,
        _key: &str,
        value: Value,
    ) -> Result<(), MapError> {
        self.info.push(instance, value)?;
        Ok(())
    }

    fn finish(&self, instance: Box<dyn Any>) -> Result<Value, MapError> {
        Ok(Value::Boxed(instance))
    }
}
