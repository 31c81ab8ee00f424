use solo_types::{IntensityProfile, DIMENSION_MAX, DIMENSION_MIN};

/// Prose for each headline intensity, indexed by `level - 1`.
pub const INTENSITY_DESCRIPTORS: [&str; 10] = [
    "minimal, sparse",
    "restrained, foundational",
    "subtle, emergent",
    "modest, controlled",
    "balanced, moderate",
    "building, intensifying",
    "complex, layered",
    "dense, intricate",
    "extreme, maximum variation",
    "total saturation, complete exploration",
];

/// Descriptor for a headline level. Values outside `1..=10` are clamped.
pub fn descriptor_for(level: u8) -> &'static str {
    let index = level.clamp(DIMENSION_MIN, DIMENSION_MAX) - DIMENSION_MIN;
    INTENSITY_DESCRIPTORS[usize::from(index)]
}

/// Descriptor for a validated profile's headline intensity.
pub fn describe(profile: &IntensityProfile) -> &'static str {
    descriptor_for(profile.headline())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        assert_eq!(descriptor_for(1), "minimal, sparse");
        assert_eq!(descriptor_for(10), "total saturation, complete exploration");
        assert_eq!(descriptor_for(0), "minimal, sparse");
        assert_eq!(descriptor_for(42), "total saturation, complete exploration");
    }

    #[test]
    fn middle_of_the_scale() {
        assert_eq!(descriptor_for(5), "balanced, moderate");
        assert_eq!(descriptor_for(8), "dense, intricate");
    }
}
