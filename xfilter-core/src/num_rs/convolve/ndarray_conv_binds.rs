use super::ConvolveMode;
use ndarray_conv::ConvMode;

impl From<ConvolveMode> for ConvMode<1> {
    fn from(mode: ConvolveMode) -> Self {
        match mode {
            ConvolveMode::Full => ConvMode::Full,
            ConvolveMode::Same => ConvMode::Same,
            ConvolveMode::Valid => ConvMode::Valid,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn modes_map_one_to_one() {
        assert!(matches!(ConvMode::<1>::from(ConvolveMode::Full), ConvMode::Full));
        assert!(matches!(ConvMode::<1>::from(ConvolveMode::Same), ConvMode::Same));
        assert!(matches!(ConvMode::<1>::from(ConvolveMode::Valid), ConvMode::Valid));
    }
}
