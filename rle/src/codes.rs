use crate::pixels::{classify, runs, Run};
use image::DynamicImage;

/// Largest count a single code can carry in its low 7 bits.
pub const MAX_COUNT: usize = 0x7f;

const CLASS_SHIFT: u32 = 7;

fn pack(black: bool, count: usize) -> u8 {
    debug_assert!((1..=MAX_COUNT).contains(&count));
    (u8::from(black) << CLASS_SHIFT) | count as u8
}

/// Codes of a single run, earliest chunk first.
#[derive(Debug, Clone)]
pub struct RunCodes {
    black: bool,
    remaining: usize,
}

impl Run {
    pub fn codes(self) -> RunCodes {
        debug_assert!(self.length > 0, "empty run for black={}", self.black);
        RunCodes {
            black: self.black,
            remaining: self.length,
        }
    }
}

impl Iterator for RunCodes {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.remaining == 0 {
            return None;
        }
        let count = self.remaining.min(MAX_COUNT);
        self.remaining -= count;

        Some(pack(self.black, count))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining.div_ceil(MAX_COUNT);
        (len, Some(len))
    }
}

impl ExactSizeIterator for RunCodes {}

pub fn encode<I>(runs: I) -> impl Iterator<Item = u8>
where
    I: IntoIterator<Item = Run>,
{
    runs.into_iter().flat_map(Run::codes)
}

/// Normalizes the image to RGB and produces its whole code stream.
pub fn compress(image: &DynamicImage) -> Vec<u8> {
    let image = image.to_rgb8();
    let codes: Vec<u8> = encode(runs(classify(&image))).collect();
    trace!(
        "{}x{} pixels packed into {} codes",
        image.width(),
        image.height(),
        codes.len()
    );

    codes
}
