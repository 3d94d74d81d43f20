// Transaction codec benchmarks.
//
// Covers catbuffer encode/decode of a transfer and of aggregates of growing
// size, DTO decode, and signing.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use nem2_sdk::model::account::{Account, Address};
use nem2_sdk::model::blockchain::NetworkType;
use nem2_sdk::model::mosaic::{Mosaic, MosaicId};
use nem2_sdk::model::transaction::{AggregateTransaction, Deadline, Message, Transaction, TransferTransaction};

const NETWORK: NetworkType = NetworkType::MijinTest;

fn transfer() -> Transaction {
    TransferTransaction::create(
        Deadline::new(7_200_000),
        Address::create_from_raw_address("SBGS2IGUED476REYI5ZZGISVSEHAF6YIQZV6YJFQ").unwrap(),
        vec![
            Mosaic::new(MosaicId::new(0x0DC6_7FBE_1CAD_29E3), 1_000_000),
            Mosaic::new(MosaicId::new(2), 5),
        ],
        Message::plain("benchmark transfer"),
        NETWORK,
    )
}

fn aggregate(size: usize) -> Transaction {
    let signer = Account::generate_new_account(NETWORK);
    let inner = transfer().to_aggregate(signer.public_account()).unwrap();
    AggregateTransaction::create_complete(Deadline::new(7_200_000), vec![inner; size], NETWORK)
}

fn bench_transfer(c: &mut Criterion) {
    let tx = transfer();
    let bytes = tx.to_catbuffer().unwrap();
    let dto = tx.to_dto();

    c.bench_function("transfer/encode", |b| b.iter(|| tx.to_catbuffer().unwrap()));
    c.bench_function("transfer/decode", |b| b.iter(|| Transaction::from_catbuffer(&bytes).unwrap()));
    c.bench_function("transfer/from_dto", |b| b.iter(|| Transaction::from_dto(&dto).unwrap()));
}

fn bench_aggregate_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate/decode");
    for size in [1usize, 10, 100] {
        let bytes = aggregate(size).to_catbuffer().unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &bytes, |b, bytes| {
            b.iter(|| Transaction::from_catbuffer(bytes).unwrap());
        });
    }
    group.finish();
}

fn bench_sign(c: &mut Criterion) {
    let account = Account::generate_new_account(NETWORK);
    let tx = transfer();
    let generation_hash = [0x57u8; 32];

    c.bench_function("transfer/sign", |b| b.iter(|| account.sign(&tx, &generation_hash).unwrap()));
}

criterion_group!(benches, bench_transfer, bench_aggregate_decode, bench_sign);
criterion_main!(benches);
