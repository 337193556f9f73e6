//! Gauss–Kronrod 7/15 node and weight tables.
//!
//! Abscissae are on `[-1, 1]`, listed from the outermost node inwards; the last entry is the
//! centre. Odd indices of [`XGK`] are the 7-point Gauss nodes, even indices are the Kronrod
//! extension. Values are the classic QUADPACK `qk15` constants (Piessens et al., 1983).

/// Number of Kronrod nodes on one side of the centre, centre included.
pub(crate) const HALF_NODES: usize = 8;

/// Kronrod abscissae.
pub(crate) const XGK: [f64; HALF_NODES] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.0,
];

/// Weights of the 15-point Kronrod rule, aligned with [`XGK`].
pub(crate) const WGK: [f64; HALF_NODES] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

/// Weights of the 7-point Gauss rule for nodes `XGK[1]`, `XGK[3]`, `XGK[5]`, `XGK[7]`.
pub(crate) const WG: [f64; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];
