use core::any::Any;

use objmap_reflect::Value;
use objmap_reflect::info::{RecordInfo, TypeInfo};

use crate::MapError;
use crate::builder::ObjectBuilder;

// -----------------------------------------------------------------------------
// RecordBuilder

/// Builder for immutable, fixed-arity types constructed in one shot.
///
/// The accumulator is a positional slot array sized to the component count.
/// Members may arrive in any wire order; `finish` invokes the constructor
/// with the slots in declared component order and fails if a required slot
/// was never filled.
pub struct RecordBuilder {
    info: &'static RecordInfo,
}

impl RecordBuilder {
    pub fn new(info: &'static RecordInfo) -> Self {
        Self { info }
    }

    fn slot_index(&self, key: &str) -> Result<usize, MapError> {
        match self.info.component(key) {
            Some((index, _)) => Ok(index),
            None => Err(MapError::UnknownMember {
                key: key.to_owned(),
                type_path: self.info.ty().path(),
            }),
        }
    }
}

impl ObjectBuilder for RecordBuilder {
    fn member_type(&self, key: &str) -> Result<&'static TypeInfo, MapError> {
        match self.info.component(key) {
            Some((_, component)) => Ok(component.type_info()),
            None => Err(MapError::UnknownMember {
                key: key.to_owned(),
                type_path: self.info.ty().path(),
            }),
        }
    }

    fn create(&self) -> Box<dyn Any> {
        let slots: Vec<Option<Value>> = (0..self.info.component_len()).map(|_| None).collect();
        Box::new(slots)
    }

    fn incorporate(
        &self,
        instance: &mut dyn Any,
        key: &str,
        value: Value,
    ) -> Result<(), MapError> {
        let index = self.slot_index(key)?;
        // `create` made this accumulator; the downcast cannot fail.
        let slots = instance.downcast_mut::<Vec<Option<Value>>>().unwrap();
        slots[index] = Some(value);
        Ok(())
    }

    fn finish(&self, instance: Box<dyn Any>) -> Result<Value, MapError> {
        let mut slots = instance.downcast::<Vec<Option<Value>>>().unwrap();
        let record = self.info.construct(&mut slots)?;
        Ok(Value::Boxed(record))
    }
}
