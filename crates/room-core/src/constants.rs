/// Speed of sound in air (m/s) at 20 °C. Used as the default propagation
/// speed for impulse-response synthesis.
pub const DEFAULT_SPEED_OF_SOUND: f64 = 343.0;

/// Sabine's empirical coefficient (s/m) relating room volume and total
/// absorption area to reverberation time: RT60 = 0.161 · V / A.
pub const SABINE_COEFFICIENT: f64 = 0.161;

/// Speed of sound in air (m/s) as a function of temperature in °C.
/// Uses the ideal-gas approximation.
pub fn speed_of_sound(temperature_c: f64) -> f64 {
    let t_kelvin = temperature_c + 273.15;
    // c = 331.3 * sqrt(T/273.15)
    331.3 * (t_kelvin / 273.15).sqrt()
}
