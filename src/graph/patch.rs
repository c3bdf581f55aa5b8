use tracing::debug;
#[cfg(feature = "rtrb")]
use tracing::warn;

#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::error::{BuildError, ControlError};
#[cfg(feature = "rtrb")]
use crate::graph::control::Controller;
use crate::graph::control::{NodeControl, Tap};
use crate::graph::node::Node;
use crate::sample::StereoSample;

/// Stable handle to one node of a [`Patch`].
///
/// Only meaningful for the patch that issued it; ids are never reused within
/// a patch's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[cfg(test)]
    pub(crate) fn test(index: u32) -> Self {
        Self(index)
    }
}

struct Slot {
    node: Node,
    layer: u32,
    output: bool,
    /// Arena indices of the nodes this one primes each tick.
    targets: Vec<u32>,
    taps: Vec<Tap>,
    #[cfg(feature = "rtrb")]
    inbox: Option<Consumer<NodeControl>>,
}

/*
Patch
=====

The signal graph: an arena of nodes plus the order they run in. One call to
`tick` advances the whole graph by exactly one sample: every node evaluates
once and every edge carries one sample, with the flagged outputs summed into
the returned mix.

Correct dataflow rests on a single rule: edges climb layers. A node at layer
n may only feed nodes at layers > n, which `connect` enforces, so running
nodes in ascending layer order means every parent has already primed its
children before any child evaluates. `order` keeps the arena indices sorted
by layer (stable for ties) and is maintained incrementally at insertion;
nothing is sorted or allocated on the tick path.
*/
pub struct Patch {
    slots: Vec<Slot>,
    order: Vec<u32>,
}

impl Patch {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Adds a node at `layer`. Its sample goes only where edges route it;
    /// see [`add_output`](Patch::add_output) for nodes that feed the mix.
    pub fn add_node(&mut self, node: Node, layer: u32) -> NodeId {
        self.insert(node, layer, false)
    }

    /// Adds a node at `layer` whose sample is also summed into the value
    /// [`tick`](Patch::tick) returns.
    pub fn add_output(&mut self, node: Node, layer: u32) -> NodeId {
        self.insert(node, layer, true)
    }

    fn insert(&mut self, node: Node, layer: u32, output: bool) -> NodeId {
        let index = self.slots.len() as u32;
        let at = self
            .order
            .partition_point(|&i| self.slots[i as usize].layer <= layer);
        self.order.insert(at, index);
        self.slots.push(Slot {
            node,
            layer,
            output,
            targets: Vec::new(),
            taps: Vec::new(),
            #[cfg(feature = "rtrb")]
            inbox: None,
        });

        let id = NodeId(index);
        debug!(node = ?id, layer, output, "node added");
        id
    }

    /// Routes `from`'s sample into `to`'s input on every tick.
    ///
    /// The edge must climb: `from`'s layer strictly below `to`'s. Anything
    /// else is rejected here, at build time, because a flat or descending
    /// edge would let `to` consume its input before `from` contributed.
    pub fn connect(&mut self, from: NodeId, to: NodeId) -> Result<(), BuildError> {
        let from_layer = self.layer_of(from)?;
        let to_layer = self.layer_of(to)?;
        if from_layer >= to_layer {
            return Err(BuildError::LayerOrder {
                from,
                to,
                from_layer,
                to_layer,
            });
        }

        self.slots[from.0 as usize].targets.push(to.0);
        debug!(?from, from_layer, ?to, to_layer, "nodes connected");
        Ok(())
    }

    fn layer_of(&self, node: NodeId) -> Result<u32, BuildError> {
        self.slots
            .get(node.0 as usize)
            .map(|slot| slot.layer)
            .ok_or(BuildError::UnknownNode(node))
    }

    /// Registers an observer on `node`'s output. The returned [`Tap`] reads
    /// the node's most recent sample from any thread.
    pub fn add_tap(&mut self, node: NodeId) -> Result<Tap, BuildError> {
        let slot = self
            .slots
            .get_mut(node.0 as usize)
            .ok_or(BuildError::UnknownNode(node))?;

        let tap = Tap::new();
        slot.taps.push(tap.clone());
        Ok(tap)
    }

    /// Hands out `node`'s control queue, once.
    ///
    /// Messages sent through the returned [`Controller`] are applied at the
    /// top of the next [`tick`](Patch::tick), so the sender may live on any
    /// thread while the patch runs on the audio thread.
    #[cfg(feature = "rtrb")]
    pub fn controller(&mut self, node: NodeId) -> Result<Controller, BuildError> {
        let slot = self
            .slots
            .get_mut(node.0 as usize)
            .ok_or(BuildError::UnknownNode(node))?;
        if slot.inbox.is_some() {
            return Err(BuildError::ControllerTaken(node));
        }

        let (controller, inbox) = Controller::attach(node);
        slot.inbox = Some(inbox);
        Ok(controller)
    }

    /// Applies a control message to `node` immediately, between ticks.
    pub fn control(
        &mut self,
        node: NodeId,
        control: impl Into<NodeControl>,
    ) -> Result<(), ControlError> {
        let slot = self
            .slots
            .get_mut(node.0 as usize)
            .ok_or(ControlError::UnknownNode(node))?;
        dispatch(node, &mut slot.node, control.into())
    }

    /// Advances the graph by one sample and returns the mixed output.
    pub fn tick(&mut self) -> StereoSample {
        #[cfg(feature = "rtrb")]
        self.drain_inboxes();

        let mut mix = StereoSample::ZERO;
        for position in 0..self.order.len() {
            let index = self.order[position] as usize;
            let sample = self.slots[index].node.evaluate();

            for edge in 0..self.slots[index].targets.len() {
                let target = self.slots[index].targets[edge] as usize;
                self.slots[target].node.prime(sample);
            }
            for tap in &self.slots[index].taps {
                tap.publish(sample);
            }
            if self.slots[index].output {
                mix += sample;
            }
        }
        mix
    }

    #[cfg(feature = "rtrb")]
    fn drain_inboxes(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(inbox) = slot.inbox.as_mut() else {
                continue;
            };
            while let Ok(control) = inbox.pop() {
                if let Err(error) = dispatch(NodeId(index as u32), &mut slot.node, control) {
                    warn!(node = index, %error, "queued control message not applied");
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for Patch {
    fn default() -> Self {
        Self::new()
    }
}

/// Routes a control message to the matching role on `node`.
fn dispatch(id: NodeId, node: &mut Node, control: NodeControl) -> Result<(), ControlError> {
    match control {
        NodeControl::Generator(control) => match node.generator_mut() {
            Some(generator) => generator.control(control),
            None => Err(ControlError::NoGenerator(id)),
        },
        NodeControl::Modifier(control) => match node.modifier_mut() {
            Some(modifier) => modifier.control(control),
            None => Err(ControlError::NoModifier(id)),
        },
    }
}
