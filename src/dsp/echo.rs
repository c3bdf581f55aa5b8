use crate::error::BuildError;
use crate::sample::StereoSample;

/*
Feedback Echo
=============

A fixed-length delay whose OUTPUT is written back into the line, so one
impulse keeps re-emerging every `sample_delay` ticks, scaled by `ratio`
on each pass:

  input:   1  0  0  0    0  0  0     ...   (delay = 3, ratio = 0.5)
  output:  1  0  0  0.5  0  0  0.25  ...

The line starts full of silence, so the first wet read happens exactly
`sample_delay` ticks after the first write. Because the fed-back value is
the full output (wet + dry), |ratio| >= 1 diverges; that is left to the
caller on purpose, since runaway feedback is a sound some patches want.
*/

pub struct Echo {
    buffer: Vec<StereoSample>, // circular, length == sample_delay
    cursor: usize,
    ratio: f32,
}

impl Echo {
    /// A delay of zero samples would feed the output straight back into
    /// itself within one tick, so it is rejected here.
    pub fn new(sample_delay: usize, decay_ratio: f32) -> Result<Self, BuildError> {
        if sample_delay == 0 {
            return Err(BuildError::ZeroDelay);
        }
        Ok(Self {
            buffer: vec![StereoSample::ZERO; sample_delay],
            cursor: 0,
            ratio: decay_ratio,
        })
    }

    pub fn delay(&self) -> usize {
        self.buffer.len()
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn set_ratio(&mut self, ratio: f32) {
        self.ratio = ratio;
    }

    pub fn filter(&mut self, dry: StereoSample) -> StereoSample {
        // The slot under the cursor holds the sample written exactly
        // `sample_delay` ticks ago; reuse it for this tick's output.
        let wet = self.buffer[self.cursor];
        let out = wet * self.ratio + dry;

        self.buffer[self.cursor] = out;
        self.cursor = (self.cursor + 1) % self.buffer.len();

        out
    }

    pub fn reset(&mut self) {
        self.buffer.fill(StereoSample::ZERO);
        self.cursor = 0;
    }
}
