//! Source injection

/// `x += dt * s` over every padded cell.
#[inline]
pub fn add_source(x: &mut [f32], s: &[f32], dt: f32) {
    for (value, source) in x.iter_mut().zip(s) {
        *value += dt * source;
    }
}
