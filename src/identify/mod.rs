//! Animal identification: independent detectors fused by fixed priority.
//!
//! Priority order is code > tag color > biometric > manual. The winner is
//! the highest-priority detector that succeeded, carrying that detector's
//! own confidence; a lower-priority detector never outranks a higher one,
//! whatever its raw confidence. Every attempted result is retained in the
//! output so callers can display partial signals.

pub mod biometric;
pub mod code;
pub mod tag;

use serde::{Deserialize, Serialize};

use crate::image::{GrayF32, ImageRgb8};

pub use biometric::{
    compare_signatures, extract_muzzle_signature, BiometricParams, BiometricSignature,
    SignatureVector, SIGNATURE_BINS,
};
pub use code::{detect_code, CodeDetection, CodeParams};
pub use tag::{detect_tags, TagDetection, TagHue, TagParams};

/// Caller-supplied identifiers.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualIdentifiers {
    pub ear_tag_id: Option<String>,
    pub rfid: Option<String>,
    pub qr_id: Option<String>,
    pub animal_id: Option<String>,
}

impl ManualIdentifiers {
    pub fn any(&self) -> bool {
        self.ear_tag_id.is_some()
            || self.rfid.is_some()
            || self.qr_id.is_some()
            || self.animal_id.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdMethod {
    Code,
    TagColor,
    Biometric,
    Manual,
    None,
}

/// Identifier values actually recovered from the frame.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DetectedIdentifiers {
    pub qr_id: Option<String>,
    pub tag_color: Option<&'static str>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationResult {
    pub method: IdMethod,
    pub confidence: f32,
    /// All attempted detector outputs, winners and losers alike.
    pub code: Option<CodeDetection>,
    pub tags: Vec<TagDetection>,
    pub biometric: Option<BiometricSignature>,
    pub manual: ManualIdentifiers,
    pub detected_identifiers: DetectedIdentifiers,
}

#[derive(Clone, Debug, Default)]
pub struct IdentifyParams {
    pub code: CodeParams,
    pub tags: TagParams,
    pub biometric: BiometricParams,
}

/// Run every detector and pick the winner by priority.
pub fn identify(
    img: &ImageRgb8<'_>,
    gray: &GrayF32,
    manual: &ManualIdentifiers,
    p: &IdentifyParams,
) -> IdentificationResult {
    let code = detect_code(gray, manual.qr_id.as_deref(), &p.code);
    let tags = detect_tags(img, &p.tags);
    let biometric = extract_muzzle_signature(gray, &p.biometric);

    let (method, confidence) = if let Some(c) = &code {
        (IdMethod::Code, c.confidence)
    } else if let Some(t) = tags.first() {
        (IdMethod::TagColor, t.confidence)
    } else if let Some(b) = &biometric {
        (IdMethod::Biometric, b.confidence)
    } else if manual.any() {
        (IdMethod::Manual, 1.0)
    } else {
        (IdMethod::None, 0.0)
    };
    log::debug!("identification: method {method:?} confidence {confidence:.2}");

    let detected_identifiers = DetectedIdentifiers {
        qr_id: code.as_ref().and_then(|c| c.payload.clone()),
        tag_color: tags.first().map(|t| t.color),
    };

    IdentificationResult {
        method,
        confidence,
        code,
        tags,
        biometric,
        manual: manual.clone(),
        detected_identifiers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_of(img: &ImageRgb8<'_>) -> GrayF32 {
        img.luma()
    }

    fn flat_image(w: usize, h: usize) -> Vec<u8> {
        vec![90u8; w * h * 3]
    }

    #[test]
    fn manual_wins_when_nothing_is_detected() {
        let data = flat_image(64, 64);
        let img = ImageRgb8 {
            w: 64,
            h: 64,
            stride: 192,
            data: &data,
        };
        let manual = ManualIdentifiers {
            ear_tag_id: Some("ET-7".into()),
            ..Default::default()
        };
        let result = identify(&img, &gray_of(&img), &manual, &IdentifyParams::default());
        assert_eq!(result.method, IdMethod::Manual);
        assert_eq!(result.confidence, 1.0);
        assert!(result.code.is_none());
        assert!(result.tags.is_empty());
    }

    #[test]
    fn no_signal_at_all_reports_none() {
        let data = flat_image(64, 64);
        let img = ImageRgb8 {
            w: 64,
            h: 64,
            stride: 192,
            data: &data,
        };
        let result = identify(
            &img,
            &gray_of(&img),
            &ManualIdentifiers::default(),
            &IdentifyParams::default(),
        );
        assert_eq!(result.method, IdMethod::None);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn tag_beats_biometric_but_loses_to_code() {
        // Textured frame (biometric present) with a yellow tag patch.
        let w = 160usize;
        let h = 160usize;
        let mut data = Vec::with_capacity(w * h * 3);
        for y in 0..h {
            for x in 0..w {
                let v = if (x / 3 + y / 3) % 2 == 0 { 40u8 } else { 210u8 };
                data.extend_from_slice(&[v, v, v]);
            }
        }
        for y in 20..52 {
            for x in 20..68 {
                let i = (y * w + x) * 3;
                data[i..i + 3].copy_from_slice(&[230, 220, 30]);
            }
        }
        let img = ImageRgb8 {
            w,
            h,
            stride: 3 * w,
            data: &data,
        };
        let result = identify(
            &img,
            &gray_of(&img),
            &ManualIdentifiers::default(),
            &IdentifyParams::default(),
        );
        assert_eq!(result.method, IdMethod::TagColor);
        assert!(result.biometric.is_some(), "biometric signal should be retained");
        assert_eq!(result.detected_identifiers.tag_color, Some("yellow"));
    }
}
