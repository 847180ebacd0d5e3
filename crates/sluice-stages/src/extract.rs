//! Metadata extractor: peels one metadata record per packet off a raw flit
//! stream and forwards every flit's data portion.

use sluice_core::{Flit, FlitData, PacketMeta};

use crate::channel::FifoChannel;
use crate::Stage;

/// Splits a flit stream into a metadata stream and a payload-data stream.
///
/// Enumerates flits within each packet; the record at index 0 supplies the
/// packet's metadata, which rides identically on every flit, so the first
/// flit alone is enough. The data portion of every flit is forwarded in
/// input order. A step requires an input flit and room on BOTH outputs;
/// otherwise it does nothing and is retried.
pub struct MetadataExtractor {
    input: FifoChannel<Flit>,
    meta_out: FifoChannel<PacketMeta>,
    data_out: FifoChannel<FlitData>,
    /// Intra-packet flit index. 0 = first flit of a packet.
    index: u32,
}

impl MetadataExtractor {
    pub fn new(
        input: FifoChannel<Flit>,
        meta_out: FifoChannel<PacketMeta>,
        data_out: FifoChannel<FlitData>,
    ) -> Self {
        Self {
            input,
            meta_out,
            data_out,
            index: 0,
        }
    }
}

impl Stage for MetadataExtractor {
    fn step(&mut self) -> bool {
        if self.input.is_empty() || self.meta_out.is_full() || self.data_out.is_full() {
            return false;
        }
        let Some(flit) = self.input.try_read() else {
            return false;
        };
        let (meta, data) = flit.split();
        if self.index == 0 {
            let source = meta.source;
            let queue = meta.queue;
            tracing::debug!(source, queue, "packet metadata captured");
            let _ = self.meta_out.try_write(meta);
        }
        let _ = self.data_out.try_write(data);
        self.index = if data.is_last() { 0 } else { self.index + 1 };
        true
    }
}
