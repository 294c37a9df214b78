use super::*;

fn pairs(records: &[RunRecord]) -> Vec<(u8, u8)> {
    records.iter().map(|r| (r.run, r.index)).collect()
}

#[test]
fn empty_input_has_no_records() {
    assert!(encode_runs(&[]).is_empty());
    assert_eq!(decode_bytes(&[]).unwrap(), Vec::<u8>::new());
}

#[test]
fn runs_break_on_value_change() {
    let records = encode_runs(&[3, 3, 3, 1, 2, 2]);
    assert_eq!(pairs(&records), vec![(3, 3), (1, 1), (2, 2)]);
}

#[test]
fn long_runs_split_at_255() {
    let indices = vec![9u8; 300];
    assert_eq!(pairs(&encode_runs(&indices)), vec![(255, 9), (45, 9)]);

    let exact = vec![1u8; 510];
    assert_eq!(pairs(&encode_runs(&exact)), vec![(255, 1), (255, 1)]);
}

#[test]
fn records_never_hold_zero_runs() {
    let indices: Vec<u8> = (0..2000u32).map(|i| ((i / 7) % 3) as u8).collect();
    let records = encode_runs(&indices);
    assert!(records.iter().all(|r| r.run >= 1 && r.run <= MAX_RUN));
    let total: usize = records.iter().map(|r| usize::from(r.run)).sum();
    assert_eq!(total, indices.len());
}

#[test]
fn decoding_restores_indices() {
    let indices: Vec<u8> = [vec![0u8; 600], vec![4, 5, 5, 6], vec![7u8; 256]].concat();
    let mut bytes = Vec::new();
    encode_into(&indices, &mut bytes);
    assert_eq!(bytes.len() % 2, 0);
    assert_eq!(decode_bytes(&bytes).unwrap(), indices);
}

#[test]
fn wire_order_is_run_then_index() {
    let mut bytes = Vec::new();
    encode_into(&[0, 0, 1, 1], &mut bytes);
    assert_eq!(bytes, vec![2, 0, 2, 1]);
}

#[test]
fn zero_run_is_malformed() {
    let err = parse_records(&[2, 0, 0, 1]).unwrap_err();
    assert!(matches!(err, PalError::MalformedRecord { offset: 2, .. }));

    let err = decode_runs(&[RunRecord { run: 0, index: 3 }]).unwrap_err();
    assert!(matches!(err, PalError::MalformedRecord { offset: 0, .. }));

    assert!(RunRecord::new(0, 1).is_err());
    assert_eq!(RunRecord::new(1, 1).unwrap().to_bytes(), [1, 1]);
}

#[test]
fn odd_length_is_malformed() {
    let err = parse_records(&[4, 0, 1]).unwrap_err();
    assert!(matches!(err, PalError::MalformedRecord { offset: 2, .. }));
}
