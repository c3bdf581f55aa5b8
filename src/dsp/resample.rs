use std::sync::Arc;

use crate::error::BuildError;
use crate::sample::{DecodedAudio, StereoSample};

/*
Plays a fixed buffer recorded at one rate as a stream at another, one sample
per produce() call. A fractional cursor walks the source; each call reads the
two samples around it and blends them linearly:

   source:   x0        x1        x2        x3
              |---------|---------|---------|
   cursor:         ^
                   0.6        out = x0 + 0.6 * (x1 - x0)

Each call advances the cursor by (source_rate / engine_rate) * speed, so a
44.1 kHz track plays at true pitch on a 48 kHz engine, and `speed` bends
pitch and duration together the way varispeed tape does.

Looping keeps the fractional overshoot when it wraps the cursor back to
loop_start, so the seam lands mid-sample exactly where the advance would
have, and pitch stays continuous across it. The wrap is modular: a speed
large enough to overshoot the region by whole laps still lands inside it.

Running off the end without a loop is terminal. The flag latches, later
speed changes do not resurrect playback; feed a new source instead. A cursor
pushed negative (negative speed) is the one silent state that is *not*
terminal, playback resumes once the cursor climbs back into the buffer.
*/
pub struct Resampler {
    samples: Arc<[StereoSample]>,
    cursor: f64,
    increment: f64,
    speed: f64,
    loop_start: usize,
    /// Zero means no looping.
    loop_end: usize,
    done: bool,
}

impl Resampler {
    /// `loop_end == 0` disables looping; otherwise the region
    /// `loop_start..loop_end` must be non-empty and inside the track.
    pub fn new(
        source: &DecodedAudio,
        engine_rate: f64,
        loop_start: usize,
        loop_end: usize,
    ) -> Result<Self, BuildError> {
        if !engine_rate.is_finite() || engine_rate <= 0.0 {
            return Err(BuildError::InvalidSampleRate(engine_rate));
        }
        let len = source.len();
        let shapeless = loop_end == 0 && loop_start != 0;
        let out_of_range = loop_end != 0 && (loop_start >= loop_end || loop_end > len);
        if shapeless || out_of_range {
            return Err(BuildError::InvalidLoopRegion {
                start: loop_start,
                end: loop_end,
                len,
            });
        }

        Ok(Self {
            samples: source.samples(),
            cursor: 0.0,
            increment: f64::from(source.sample_rate()) / engine_rate,
            speed: 1.0,
            loop_start,
            loop_end,
            done: false,
        })
    }

    pub fn produce(&mut self) -> StereoSample {
        if self.done {
            return StereoSample::ZERO;
        }
        if self.cursor < 0.0 {
            self.advance();
            return StereoSample::ZERO;
        }

        let i0 = self.cursor as usize;
        if i0 >= self.samples.len() {
            // Only reachable with looping off; a looping cursor is wrapped
            // back into its region on every advance.
            self.done = true;
            return StereoSample::ZERO;
        }

        let i1 = if i0 + 1 < self.samples.len() {
            i0 + 1
        } else if self.loop_end != 0 {
            i0 + 1 - (self.loop_end - self.loop_start)
        } else {
            i0
        };

        let t = (self.cursor - i0 as f64) as f32;
        let a = self.samples[i0];
        let b = self.samples[i1];
        let out = a + (b - a) * t;

        self.advance();
        out
    }

    pub fn set_speed(&mut self, multiplier: f64) {
        self.speed = multiplier;
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    fn advance(&mut self) {
        self.cursor += self.increment * self.speed;
        if self.loop_end != 0 && self.cursor >= self.loop_end as f64 {
            let start = self.loop_start as f64;
            let length = self.loop_end as f64 - start;
            self.cursor = start + (self.cursor - start).rem_euclid(length);
        }
    }
}
