//! Line-break translation flags used when a scanner copies text out.

use bitflags::bitflags;

bitflags! {
    /// How `\r\n`, `\r` and `\n` are rewritten in scan output.
    ///
    /// Flags can be combined. When two flags rewrite the same sequence,
    /// `CR_LF_TO_CR` beats `CR_LF_TO_LF`, `LF_TO_CR` beats `LF_TO_CR_LF`
    /// and `CR_TO_CR_LF` beats `CR_TO_LF`.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    #[derive(serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct LineBreakOptions: u8 {
        const CR_LF_TO_LF = 1 << 0;
        const CR_LF_TO_CR = 1 << 1;
        const LF_TO_CR_LF = 1 << 2;
        const LF_TO_CR = 1 << 3;
        const CR_TO_CR_LF = 1 << 4;
        const CR_TO_LF = 1 << 5;
    }
}

impl Default for LineBreakOptions {
    fn default() -> Self {
        Self::empty()
    }
}

impl LineBreakOptions {
    /// Replacement text for a `\r\n` pair.
    pub fn translate_crlf(self) -> &'static str {
        if self.contains(Self::CR_LF_TO_CR) {
            "\r"
        } else if self.contains(Self::CR_LF_TO_LF) {
            "\n"
        } else {
            "\r\n"
        }
    }

    /// Replacement text for a lone `\n`.
    pub fn translate_lf(self) -> &'static str {
        if self.contains(Self::LF_TO_CR) {
            "\r"
        } else if self.contains(Self::LF_TO_CR_LF) {
            "\r\n"
        } else {
            "\n"
        }
    }

    /// Replacement text for a lone `\r`.
    pub fn translate_cr(self) -> &'static str {
        if self.contains(Self::CR_TO_CR_LF) {
            "\r\n"
        } else if self.contains(Self::CR_TO_LF) {
            "\n"
        } else {
            "\r"
        }
    }
}
