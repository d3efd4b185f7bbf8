//! Output side of the host contract: element attributes and inline styles.

use dragkit_foundation::{HostError, InputHost};

pub trait StyleHost: InputHost {
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn set_attribute(
        &self,
        element: &Self::Element,
        name: &str,
        value: &str,
    ) -> Result<(), HostError>;

    /// Sets one inline style property, e.g. `("top", "65px")`.
    fn set_style(&self, element: &Self::Element, property: &str, value: &str)
        -> Result<(), HostError>;
}
