#![no_main]

use libfuzzer_sys::fuzz_target;
use masslynx_xlsx::align::{build_wide_table, Sample};
use masslynx_xlsx::dataset::Dataset;
use masslynx_xlsx::parser::{decode_lossy, parse_records};
use masslynx_xlsx::record::SourceInfo;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must decode, parse and align without panicking
    let decoded = decode_lossy(data);
    let source = SourceInfo::named("fuzz.txt");
    let records = parse_records(&decoded.text, &source);

    for record in &records {
        assert!(!record.time.is_nan());
        assert!(!record.channel_id.is_empty());
    }

    let dataset: Dataset = records.into_iter().collect();
    for partition in dataset.partitions() {
        let table = partition.to_wide_table(3);
        assert_eq!(table.sources().len(), partition.source_file_count());
        let _ = build_wide_table(partition.records().iter().map(|r| Sample::from(*r)), 0);
    }
});
