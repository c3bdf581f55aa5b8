use crate::error::BuildError;
use crate::sample::StereoSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Attack,
    Decay,
    Sustain,
    Release,
    Stopped,
}

/*
Piecewise-linear gain envelope:

      1.0 -|    /\
           |   /  \______________
  sustain -|  /                  \
           | /                    \
      0.0 -|/                      \________
            attack decay  sustain   release

Attack, decay and release are wall-clock seconds converted to a per-sample
slope at construction; sustain is a level in dB (clamped to 0 dB or less)
converted to linear gain. Each slope is fixed, so releasing early or
retriggering mid-tail keeps the same steepness rather than the same
duration. Stage durations are clamped to at least one sample so no slope
is ever infinite.
*/
pub struct Adsr {
    stage: Stage,
    gain: f32,
    sustain: f32,
    attack_step: f32,
    decay_step: f32,
    release_step: f32,
}

impl Adsr {
    /// Times are in seconds, sustain in dB relative to full scale. The
    /// envelope opens in its attack stage, matching a note that starts
    /// sounding the moment it exists.
    pub fn new(
        attack: f32,
        decay: f32,
        sustain_db: f32,
        release: f32,
        sample_rate: f64,
    ) -> Result<Self, BuildError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(BuildError::InvalidSampleRate(sample_rate));
        }
        let rate = sample_rate as f32;
        let floor = 1.0 / rate;
        let attack = attack.max(floor);
        let decay = decay.max(floor);
        let release = release.max(floor);
        let sustain = db_to_linear(sustain_db.min(0.0));

        Ok(Self {
            stage: Stage::Attack,
            gain: 0.0,
            sustain,
            attack_step: 1.0 / (attack * rate),
            decay_step: (sustain - 1.0) / (decay * rate),
            release_step: -sustain / (release * rate),
        })
    }

    pub fn filter(&mut self, input: StereoSample) -> StereoSample {
        let out = input * self.gain;
        self.advance();
        out
    }

    /// Restarts the attack ramp from the current level, so retriggering
    /// during the tail does not click back through silence.
    pub fn trigger(&mut self) {
        self.stage = Stage::Attack;
    }

    pub fn release(&mut self) {
        self.stage = Stage::Release;
    }

    pub fn is_stopped(&self) -> bool {
        self.stage == Stage::Stopped
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    fn advance(&mut self) {
        match self.stage {
            Stage::Attack => {
                self.gain += self.attack_step;
                if self.gain >= 1.0 {
                    self.gain = 1.0;
                    self.stage = Stage::Decay;
                }
            }
            Stage::Decay => {
                self.gain += self.decay_step;
                if self.gain <= self.sustain {
                    self.gain = self.sustain;
                    self.stage = Stage::Sustain;
                }
            }
            Stage::Sustain => {}
            Stage::Release => {
                self.gain += self.release_step;
                if self.gain <= 0.0 {
                    self.gain = 0.0;
                    self.stage = Stage::Stopped;
                }
            }
            Stage::Stopped => {}
        }
    }
}

fn db_to_linear(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}
