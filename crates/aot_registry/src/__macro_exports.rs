//! Items used by the derive macro output.

#[cfg(feature = "auto_register")]
pub use auto_register::*;

#[cfg(feature = "auto_register")]
mod auto_register {
    use crate::descriptor::Shaped;
    use crate::error::ConfigurationError;
    use crate::registry::TypeRegistry;

    pub use inventory;

    /// A root submitted for [`TypeRegistry::auto_register`].
    pub struct AutoRegistration {
        register: fn(&mut TypeRegistry) -> Result<(), ConfigurationError>,
    }

    impl AutoRegistration {
        pub const fn of<T: Shaped>() -> Self {
            Self {
                register: register_root::<T>,
            }
        }
    }

    fn register_root<T: Shaped>(registry: &mut TypeRegistry) -> Result<(), ConfigurationError> {
        registry.register_closure::<T>()
    }

    inventory::collect!(AutoRegistration);

    pub(crate) fn register_submitted(registry: &mut TypeRegistry) -> Result<usize, ConfigurationError> {
        let mut count = 0;
        for submission in inventory::iter::<AutoRegistration> {
            (submission.register)(registry)?;
            count += 1;
        }
        Ok(count)
    }
}
