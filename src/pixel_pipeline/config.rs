//! Decoder configuration types

/// Which output the color-capable decoders produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// RGB output for chroma and Bayer formats
    Color,
    /// Grayscale output only; chroma formats skip color conversion entirely
    LumaOnly,
}

/// Bayer demosaicing algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemosaicMethod {
    /// Fastest, blocky edges
    NearestNeighbour,
    /// Bilinear interpolation (default)
    Linear,
    /// Bicubic interpolation, slowest
    Cubic,
}

/// Quantization range of 4:2:2 luma/chroma samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRange {
    /// Y in 16..=235, UV in 16..=240
    Limited,
    /// Y and UV in 0..=255
    Full,
}

/// YCbCr to RGB matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMatrix {
    Bt601,
    Bt709,
    Bt2020,
}

/// Configuration shared by the built-in decoder factories
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    pub output: OutputMode,
    pub demosaic: DemosaicMethod,
    pub color_range: ColorRange,
    pub color_matrix: ColorMatrix,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            output: OutputMode::Color,
            demosaic: DemosaicMethod::Linear,
            color_range: ColorRange::Limited,
            color_matrix: ColorMatrix::Bt709,
        }
    }
}

impl DecoderConfig {
    pub fn builder() -> DecoderConfigBuilder {
        DecoderConfigBuilder::default()
    }
}

/// Builder for DecoderConfig
#[derive(Default)]
pub struct DecoderConfigBuilder {
    output: Option<OutputMode>,
    demosaic: Option<DemosaicMethod>,
    color_range: Option<ColorRange>,
    color_matrix: Option<ColorMatrix>,
}

impl DecoderConfigBuilder {
    pub fn output(mut self, output: OutputMode) -> Self {
        self.output = Some(output);
        self
    }

    pub fn luma_only(self, enable: bool) -> Self {
        self.output(if enable { OutputMode::LumaOnly } else { OutputMode::Color })
    }

    pub fn demosaic(mut self, method: DemosaicMethod) -> Self {
        self.demosaic = Some(method);
        self
    }

    pub fn color_range(mut self, range: ColorRange) -> Self {
        self.color_range = Some(range);
        self
    }

    pub fn color_matrix(mut self, matrix: ColorMatrix) -> Self {
        self.color_matrix = Some(matrix);
        self
    }

    pub fn build(self) -> DecoderConfig {
        let default = DecoderConfig::default();
        DecoderConfig {
            output: self.output.unwrap_or(default.output),
            demosaic: self.demosaic.unwrap_or(default.demosaic),
            color_range: self.color_range.unwrap_or(default.color_range),
            color_matrix: self.color_matrix.unwrap_or(default.color_matrix),
        }
    }
}
