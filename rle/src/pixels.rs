use image::{Rgb, RgbImage};

/// A maximal sequence of consecutive pixels in scan order sharing one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub black: bool,
    pub length: usize,
}

pub fn is_black(pixel: &Rgb<u8>) -> bool {
    pixel.0 == [0, 0, 0]
}

/// Classifies the pixels row by row, left to right. The scan is not reset
/// between rows.
pub fn classify(image: &RgbImage) -> impl Iterator<Item = bool> + '_ {
    image.pixels().map(is_black)
}

pub fn runs<I>(pixels: I) -> Runs<I::IntoIter>
where
    I: IntoIterator<Item = bool>,
{
    Runs {
        pixels: pixels.into_iter(),
        pending: None,
    }
}

pub struct Runs<I> {
    pixels: I,
    pending: Option<Run>,
}

impl<I> Iterator for Runs<I>
where
    I: Iterator<Item = bool>,
{
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        for black in self.pixels.by_ref() {
            match &mut self.pending {
                Some(run) if run.black == black => run.length += 1,
                pending => {
                    let finished = pending.replace(Run { black, length: 1 });
                    if finished.is_some() {
                        return finished;
                    }
                }
            }
        }

        self.pending.take()
    }
}
