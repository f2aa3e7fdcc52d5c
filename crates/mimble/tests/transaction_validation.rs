//! Standalone transaction validation with real crypto.

use mimble::core::{
    validate_transaction, Collection, ConsensusParams, Crypto, Hashed, KernelFeatures,
    OutputFeatures, Transaction, TransactionBody,
};
use mimble::ValidationError;
use mimble_testkit::TestFixture;

fn validate(fixture: &TestFixture, tx: &Transaction) -> Result<(), ValidationError> {
    validate_transaction(fixture.crypto().as_ref(), &ConsensusParams::default(), tx)
}

#[test]
fn two_inputs_two_outputs_one_kernel() {
    let mut fixture = TestFixture::new(b"2x2");
    let tx = fixture.transaction(&[60, 40], &[70, 28], 2);
    assert_eq!(tx.body.inputs.len(), 2);
    assert_eq!(tx.body.outputs.len(), 2);
    assert_eq!(tx.body.kernels.len(), 1);
    validate(&fixture, &tx).unwrap();
}

#[test]
fn swapped_inputs_fail_sort_check() {
    let mut fixture = TestFixture::new(b"2x2-swapped");
    let mut tx = fixture.transaction(&[60, 40], &[70, 28], 2);
    tx.body.inputs.swap(0, 1);
    assert_eq!(
        validate(&fixture, &tx),
        Err(ValidationError::Unsorted {
            collection: Collection::Inputs,
            index: 0
        })
    );
}

#[test]
fn wrong_fee_fails_balance() {
    let mut fixture = TestFixture::new(b"fee");
    // The kernel claims 3 but the amounts leave 2.
    let tx = fixture.transaction(&[50], &[48], 3);
    assert_eq!(validate(&fixture, &tx), Err(ValidationError::KernelSumMismatch));
}

#[test]
fn missing_offset_fails_balance() {
    let mut fixture = TestFixture::new(b"offset");
    let mut tx = fixture.transaction(&[50], &[48], 2);
    tx.offset = mimble::BlindingFactor::ZERO;
    assert_eq!(validate(&fixture, &tx), Err(ValidationError::KernelSumMismatch));
}

#[test]
fn coinbase_features_rejected() {
    let mut fixture = TestFixture::new(b"coinbase");
    let mut tx = fixture.transaction(&[50], &[48], 2);
    tx.body.kernels[0].features = KernelFeatures::COINBASE_KERNEL;
    assert_eq!(validate(&fixture, &tx), Err(ValidationError::CoinbaseInTransaction));

    let mut tx = fixture.transaction(&[50], &[48], 2);
    tx.body.outputs[0].features = OutputFeatures::COINBASE_OUTPUT;
    tx.body.sort();
    assert_eq!(validate(&fixture, &tx), Err(ValidationError::CoinbaseInTransaction));
}

#[test]
fn aggregated_transactions_validate_with_summed_offsets() {
    let mut fixture = TestFixture::new(b"aggregate");
    let a = fixture.transaction(&[50], &[48], 2);
    let b = fixture.transaction(&[90, 10], &[95], 5);

    let crypto = fixture.crypto();
    let offset =
        mimble::core::add_kernel_offsets(crypto.as_ref(), &[a.offset], &[b.offset]).unwrap();
    let aggregate = Transaction::new(offset, a.body.merge(b.body));
    assert_eq!(aggregate.fee(), Some(7));
    validate(&fixture, &aggregate).unwrap();
}

#[test]
fn kernel_excess_signs_its_own_message() {
    let mut fixture = TestFixture::new(b"kernel");
    let tx = fixture.transaction(&[50], &[48], 2);
    let kernel = &tx.body.kernels[0];
    fixture
        .crypto()
        .verify_kernel_signature(&kernel.excess, &kernel.signature_message(), &kernel.excess_sig)
        .unwrap();
}

#[test]
fn empty_transaction_is_valid() {
    let fixture = TestFixture::new(b"empty");
    let tx = Transaction::new(mimble::BlindingFactor::ZERO, TransactionBody::default());
    validate(&fixture, &tx).unwrap();
}

#[test]
fn output_order_ignores_proof_bytes() {
    let mut fixture = TestFixture::new(b"identity");
    let tx = fixture.transaction(&[50], &[20, 28], 2);
    let mut stripped = tx.body.outputs.clone();
    for output in &mut stripped {
        output.proof = Default::default();
    }
    let hashes: Vec<_> = tx.body.outputs.iter().map(Hashed::hash).collect();
    let stripped_hashes: Vec<_> = stripped.iter().map(Hashed::hash).collect();
    assert_eq!(hashes, stripped_hashes);
}
