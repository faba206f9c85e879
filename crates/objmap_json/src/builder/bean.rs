use core::any::Any;

use objmap_reflect::Value;
use objmap_reflect::info::{BeanField, BeanInfo, TypeInfo};

use crate::MapError;
use crate::builder::ObjectBuilder;

// -----------------------------------------------------------------------------
// BeanBuilder

/// Builder for mutable, default-constructible types populated field by
/// field.
///
/// `create` makes a default instance; `incorporate` routes each value
/// through the field's write accessor; `finish` is the identity.
pub struct BeanBuilder {
    info: &'static BeanInfo,
}

impl BeanBuilder {
    pub fn new(info: &'static BeanInfo) -> Self {
        Self { info }
    }

    fn field(&self, key: &str) -> Result<&BeanField, MapError> {
        self.info.field(key).ok_or_else(|| MapError::UnknownMember {
            key: key.to_owned(),
            type_path: self.info.ty().path(),
        })
    }
}

impl ObjectBuilder for BeanBuilder {
    fn member_type(&self, key: &str) -> Result<&'static TypeInfo, MapError> {
        Ok(self.field(key)?.type_info())
    }

    fn create(&self) -> Box<dyn Any> {
        self.info.construct()
    }

    fn incorporate(
        &self,
        instance: &mut dyn Any,
        key: &str,
        value: Value,
    ) -> Result<(), MapError> {
        let field = self.field(key)?;
        (field.set())(instance, value)?;
        Ok(())
    }

    fn finish(&self, instance: Box<dyn Any>) -> Result<Value, MapError> {
        Ok(Value::Boxed(instance))
    }
}
