/// A colour in the grey colour space, the only one invoices are printed in
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
}
