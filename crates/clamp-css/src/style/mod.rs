//! Style: `style` attribute declarations, value types, and computed style.

pub mod computed;
pub mod declaration;
pub mod values;

pub use computed::ComputedStyle;
pub use declaration::{
    Declaration, inline_style_property, parse_declarations, serialize_declarations,
    set_style_property,
};
pub use values::{
    DEFAULT_FONT_SIZE_PX, DisplayValue, LengthValue, LineHeight, NORMAL_LINE_HEIGHT_RATIO,
    default_display_for_element,
};
