use crate::error::ControlError;
use crate::graph::control::{GeneratorControl, ModifierControl};
use crate::sample::StereoSample;

/// A source of samples: one fresh [`StereoSample`] per tick, no input.
///
/// `produce` runs on the tick path and must stay allocation-free and
/// infallible; anything that can fail belongs in construction or in
/// [`control`](Generator::control).
pub trait Generator: Send {
    fn produce(&mut self) -> StereoSample;

    /// Answers a typed control message, or explains why it cannot.
    fn control(&mut self, control: GeneratorControl) -> Result<(), ControlError>;
}

/// A transformer: one sample in, one sample out, every tick.
///
/// Same real-time rules as [`Generator`]: `filter` cannot fail or allocate.
pub trait Modifier: Send {
    fn filter(&mut self, input: StereoSample) -> StereoSample;

    fn control(&mut self, control: ModifierControl) -> Result<(), ControlError>;
}

/// Combines a node's generated sample with its filtered incoming sample.
pub type Interactor = Box<dyn FnMut(StereoSample, StereoSample) -> StereoSample + Send>;

/*
Node
====

One processing unit of a patch: at most one generator, at most one modifier,
and the interactor that merges their outputs. Each tick the node

  1. asks its generator for a fresh sample (silence if it has none),
  2. hands everything its parents primed since the last tick to its
     modifier (silence in, if it has none), and clears that accumulator,
  3. returns interactor(generated, filtered).

The pending-input accumulator is the only place signals mix: every parent
adds its sample in, and the one evaluation per tick consumes the sum. The
patch's layer ordering guarantees all parents have primed before the node
evaluates; the node itself never checks.

The default interactor depends on which roles are present: a lone
generator or lone modifier passes through untouched, while a node carrying
both multiplies them per channel (amplitude modulation, which is what a
carrier × envelope vocoder band wants).
*/
pub struct Node {
    generator: Option<Box<dyn Generator>>,
    modifier: Option<Box<dyn Modifier>>,
    interactor: Interactor,
    pending: StereoSample,
}

impl Node {
    /// A node that only produces: the generator's sample passes through.
    pub fn generator(generator: impl Generator + 'static) -> Self {
        Self {
            generator: Some(Box::new(generator)),
            modifier: None,
            interactor: Box::new(|generated, _| generated),
            pending: StereoSample::ZERO,
        }
    }

    /// A node that only transforms: the modifier's sample passes through.
    pub fn modifier(modifier: impl Modifier + 'static) -> Self {
        Self {
            generator: None,
            modifier: Some(Box::new(modifier)),
            interactor: Box::new(|_, filtered| filtered),
            pending: StereoSample::ZERO,
        }
    }

    /// A node carrying both roles, combined per channel by multiplication.
    pub fn new(generator: impl Generator + 'static, modifier: impl Modifier + 'static) -> Self {
        Self {
            generator: Some(Box::new(generator)),
            modifier: Some(Box::new(modifier)),
            interactor: Box::new(|generated, filtered| generated * filtered),
            pending: StereoSample::ZERO,
        }
    }

    /// Replaces the combining function.
    pub fn set_interactor(
        &mut self,
        interactor: impl FnMut(StereoSample, StereoSample) -> StereoSample + Send + 'static,
    ) {
        self.interactor = Box::new(interactor);
    }

    /// Builder-flavored [`set_interactor`](Node::set_interactor).
    pub fn with_interactor(
        mut self,
        interactor: impl FnMut(StereoSample, StereoSample) -> StereoSample + Send + 'static,
    ) -> Self {
        self.set_interactor(interactor);
        self
    }

    pub fn generator_mut(&mut self) -> Option<&mut (dyn Generator + 'static)> {
        self.generator.as_deref_mut()
    }

    pub fn modifier_mut(&mut self) -> Option<&mut (dyn Modifier + 'static)> {
        self.modifier.as_deref_mut()
    }

    /// Adds a parent's sample into the pending input. Called by the patch
    /// for every edge pointing at this node, before this node's own turn.
    pub(crate) fn prime(&mut self, input: StereoSample) {
        self.pending += input;
    }

    /// One tick of this node. Consumes the pending input exactly once;
    /// whatever parents prime afterwards belongs to the next tick.
    pub(crate) fn evaluate(&mut self) -> StereoSample {
        let generated = match &mut self.generator {
            Some(generator) => generator.produce(),
            None => StereoSample::ZERO,
        };

        let input = std::mem::take(&mut self.pending);
        let filtered = match &mut self.modifier {
            Some(modifier) => modifier.filter(input),
            None => StereoSample::ZERO,
        };

        (self.interactor)(generated, filtered)
    }
}
