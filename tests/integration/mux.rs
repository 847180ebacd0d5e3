use crate::*;

use anyhow::{bail, Context, Result};
use sluice_core::{FlitData, TaggedUnion};
use sluice_stages::{run_to_quiescence, MetadataExtractor, MetadataInjector};

/// Metadata-or-data record as it crosses a single shared channel.
type Record = TaggedUnion<PacketMeta, FlitData>;

/// Interleave the extractor's two outputs onto one wire-form channel, in
/// packet order: each packet's metadata record, then its data records.
fn mux(
    metas: Vec<PacketMeta>,
    datas: Vec<FlitData>,
    shared: &FifoChannel<Vec<u8>>,
) -> Result<()> {
    let mut metas = metas.into_iter();
    let mut at_packet_start = true;
    for data in datas {
        if at_packet_start {
            let meta = metas.next().context("packet with no metadata record")?;
            feed(shared, [Record::left(meta).to_wire()]);
        }
        at_packet_start = data.is_last();
        feed(shared, [Record::right(data).to_wire()]);
    }
    if metas.next().is_some() {
        bail!("metadata record with no matching packet");
    }
    Ok(())
}

/// Decode wire forms off the shared channel and route each record to the
/// injector input of its kind.
fn demux(
    shared: &FifoChannel<Vec<u8>>,
    meta_in: &FifoChannel<PacketMeta>,
    data_in: &FifoChannel<FlitData>,
) -> Result<()> {
    while let Some(bytes) = shared.try_read() {
        let record = Record::from_wire(&bytes).context("malformed record on shared channel")?;
        match record {
            TaggedUnion::Left(meta) => feed(meta_in, [meta]),
            TaggedUnion::Right(data) => feed(data_in, [data]),
        }
    }
    Ok(())
}

/// Both record kinds cross one channel in wire form and the packets come
/// out whole on the far side.
#[test]
fn heterogeneous_records_share_one_channel() -> Result<()> {
    let input = FifoChannel::with_capacity(16);
    let meta_mid = FifoChannel::with_capacity(8);
    let data_mid = FifoChannel::with_capacity(16);
    let mut extractor = MetadataExtractor::new(input.clone(), meta_mid.clone(), data_mid.clone());

    let mut flits = packet(4, 3, 0x00);
    flits.extend(packet(5, 2, 0x80));
    feed(&input, flits.iter().copied());
    run_to_quiescence(&mut [&mut extractor]);

    // One channel now carries both kinds, self-described by the trailing
    // discriminant of each record's wire form.
    let shared = FifoChannel::with_capacity(16);
    mux(drain(&meta_mid), drain(&data_mid), &shared)?;
    assert_eq!(shared.len(), 2 + 5);

    let meta_in = FifoChannel::with_capacity(8);
    let data_in = FifoChannel::with_capacity(16);
    let out = FifoChannel::with_capacity(16);
    let mut injector = MetadataInjector::new(meta_in.clone(), data_in.clone(), out.clone());

    demux(&shared, &meta_in, &data_in)?;
    run_to_quiescence(&mut [&mut injector]);

    assert_eq!(drain(&out), flits);
    Ok(())
}

/// A record truncated in transit is reported, not misdecoded.
#[test]
fn truncated_wire_record_is_rejected() {
    let meta = PacketMeta { source: 1, queue: 2 };
    let mut bytes = Record::left(meta).to_wire();
    bytes.pop();
    assert!(Record::from_wire(&bytes).is_err());
}
