/// A rendering surface the machine draws to.
///
/// Calls arrive synchronously from the single cycle-execution thread while a
/// UI layer may read the pixels concurrently, so implementations serialize
/// internally and take `&self`.
pub trait Display: Send + Sync {
    /// Unsets every pixel.
    fn clear(&self);

    /// XORs a sprite onto the bitmap at `(x, y)`.
    ///
    /// Each byte is one 8-pixel row, most significant bit leftmost. Returns
    /// true iff any previously-lit pixel went dark.
    fn draw_sprite(&self, sprite: &[u8], x: u8, y: u8) -> bool;
}

/// A display that swallows every draw. Nothing ever collides.
pub struct NullDisplay;

impl Display for NullDisplay {
    fn clear(&self) {}

    fn draw_sprite(&self, _sprite: &[u8], _x: u8, _y: u8) -> bool {
        false
    }
}
