//! Metadata injector: rejoins a packet's metadata record with its
//! payload-data records to reconstitute the annotated flit stream.

use sluice_core::{Flit, FlitData, PacketMeta};

use crate::channel::FifoChannel;
use crate::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InjectorState {
    /// Awaiting the metadata record for the next packet.
    Idle,
    /// Emitting flits for the packet whose metadata is held.
    Stream { meta: PacketMeta },
}

/// Consumes one metadata record, then stamps it onto every payload-data
/// record through the next `last`, emitting whole flits.
///
/// Holds no more than the one metadata record; upstream must deliver one
/// metadata record per packet, in the same order as the packets' data
/// records. There is no reordering or deeper buffering here.
pub struct MetadataInjector {
    meta_in: FifoChannel<PacketMeta>,
    data_in: FifoChannel<FlitData>,
    output: FifoChannel<Flit>,
    state: InjectorState,
}

impl MetadataInjector {
    pub fn new(
        meta_in: FifoChannel<PacketMeta>,
        data_in: FifoChannel<FlitData>,
        output: FifoChannel<Flit>,
    ) -> Self {
        Self {
            meta_in,
            data_in,
            output,
            state: InjectorState::Idle,
        }
    }

    /// Whether the injector is between packets, ready for the next
    /// metadata record.
    pub fn is_idle(&self) -> bool {
        self.state == InjectorState::Idle
    }
}

impl Stage for MetadataInjector {
    fn step(&mut self) -> bool {
        match self.state {
            InjectorState::Idle => {
                let Some(meta) = self.meta_in.try_read() else {
                    return false;
                };
                let source = meta.source;
                let queue = meta.queue;
                tracing::debug!(source, queue, "metadata held for next packet");
                self.state = InjectorState::Stream { meta };
                true
            }
            InjectorState::Stream { meta } => {
                if self.data_in.is_empty() || self.output.is_full() {
                    return false;
                }
                let Some(data) = self.data_in.try_read() else {
                    return false;
                };
                let _ = self.output.try_write(Flit::join(meta, data));
                if data.is_last() {
                    tracing::debug!("packet complete, metadata released");
                    self.state = InjectorState::Idle;
                }
                true
            }
        }
    }
}
