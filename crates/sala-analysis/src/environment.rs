//! Physical properties of the propagation medium.
//!
//! Dry-air approximations used across acoustic calculations, plus
//! frequency/wavelength conversion.

/// Speed of sound in dry air at 20 °C, m/s.
pub const SOUND_SPEED: f64 = 343.0;

/// Length unit for wavelength conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    /// Kilometers.
    Kilometers,
    /// Meters.
    Meters,
    /// Centimeters.
    Centimeters,
    /// Millimeters.
    Millimeters,
}

impl LengthUnit {
    /// How many of this unit make up one meter.
    fn per_meter(self) -> f64 {
        match self {
            LengthUnit::Kilometers => 0.001,
            LengthUnit::Meters => 1.0,
            LengthUnit::Centimeters => 100.0,
            LengthUnit::Millimeters => 1000.0,
        }
    }
}

/// Approximate speed of sound in dry air at `temperature_c` °C, m/s.
///
/// `331.3 * sqrt(1 + T/273.15)`, rounded to one decimal.
pub fn sound_speed(temperature_c: f64) -> f64 {
    let c = 331.3 * (1.0 + temperature_c / 273.15).sqrt();
    (c * 10.0).round() / 10.0
}

/// Density of dry air (0% relative humidity), kg/m³.
///
/// `temperature_c` in °C, `pressure_bar` in bar.
pub fn air_density(temperature_c: f64, pressure_bar: f64) -> f64 {
    const GAS_CONSTANT: f64 = 287.058;
    (pressure_bar * 100_000.0) / (GAS_CONSTANT * (temperature_c + 273.15))
}

/// Wavelength of a frequency, in the selected unit.
pub fn frequency_to_wavelength(frequency_hz: f64, c: f64, unit: LengthUnit) -> f64 {
    c / frequency_hz * unit.per_meter()
}

/// Frequency of a wavelength given in the selected unit.
pub fn wavelength_to_frequency(wavelength: f64, c: f64, unit: LengthUnit) -> f64 {
    c / wavelength * unit.per_meter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sound_speed_at_room_temperature() {
        assert_eq!(sound_speed(20.0), 343.2);
        assert_eq!(sound_speed(0.0), 331.3);
    }

    #[test]
    fn air_density_at_standard_conditions() {
        let density = air_density(20.0, 1.013);
        assert!((density - 1.2038).abs() < 1e-3, "got {density}");
    }

    #[test]
    fn wavelength_conversions_are_inverse() {
        let l = frequency_to_wavelength(1000.0, SOUND_SPEED, LengthUnit::Meters);
        assert!((l - 0.343).abs() < 1e-12);
        let f = wavelength_to_frequency(l, SOUND_SPEED, LengthUnit::Meters);
        assert!((f - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn unit_selection_scales_wavelength() {
        let mm = frequency_to_wavelength(1000.0, SOUND_SPEED, LengthUnit::Millimeters);
        assert!((mm - 343.0).abs() < 1e-9);
    }
}
