// Copyright 2024-2025 Irreducible Inc.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use curlbatch_hash::{
	Curl, CurlMode, HasherConfig, bundle::TRANSACTION_TRYTES, create_session_with, hash_records,
	load_chunks, par_hash_records, read_hashes, run_cycle,
};
use curlbatch_trinary::{MAX_LANES, TRYTE_ALPHABET, TRYTES_PER_CHUNK, trytes_to_trits};
use curlbatch_utils::tracing::init_tracing;
use rand::{Rng, thread_rng};

fn random_trytes(length: usize) -> Vec<u8> {
	let mut rng = thread_rng();
	(0..length)
		.map(|_| TRYTE_ALPHABET[rng.gen_range(0..TRYTE_ALPHABET.len())])
		.collect()
}

fn bench_single_cycle(c: &mut Criterion) {
	init_tracing();
	let mut group = c.benchmark_group("Curl-P-81 cycle");

	let input = random_trytes(MAX_LANES * TRYTES_PER_CHUNK);
	group.throughput(Throughput::Elements(MAX_LANES as u64));

	let config = HasherConfig::default();
	let mut session = create_session_with(&config);
	group.bench_function("bit-sliced, 64 chunks", |bench| {
		bench.iter(|| {
			load_chunks(&mut session, &input, MAX_LANES).unwrap();
			run_cycle(&mut session).unwrap();
			read_hashes(&session, MAX_LANES).unwrap()
		})
	});

	let trits = input
		.chunks_exact(TRYTES_PER_CHUNK)
		.map(|chunk| trytes_to_trits(chunk, TRYTES_PER_CHUNK).unwrap())
		.collect::<Vec<_>>();
	group.bench_function("scalar, 64 chunks", |bench| {
		bench.iter(|| {
			trits
				.iter()
				.map(|chunk| Curl::digest(CurlMode::P81, chunk))
				.collect::<Vec<_>>()
		})
	});

	group.finish()
}

fn bench_transactions(c: &mut Criterion) {
	let mut group = c.benchmark_group("Transactions");

	const N_TRANSACTIONS: usize = 256;

	let records = (0..N_TRANSACTIONS)
		.map(|_| random_trytes(TRANSACTION_TRYTES))
		.collect::<Vec<_>>();
	group.throughput(Throughput::Elements(N_TRANSACTIONS as u64));

	let config = HasherConfig::default();
	group.bench_function("one session per 64 transactions", |bench| {
		let mut session = create_session_with(&config);
		bench.iter(|| {
			records
				.chunks(MAX_LANES)
				.map(|batch| hash_records(&mut session, batch).unwrap())
				.collect::<Vec<_>>()
		})
	});

	group.bench_function("rayon", |bench| {
		bench.iter(|| par_hash_records(&config, &records).unwrap())
	});

	group.finish()
}

criterion_group!(hash, bench_single_cycle, bench_transactions);
criterion_main!(hash);
