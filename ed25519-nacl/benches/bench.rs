use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use ed25519_nacl::{CompressedEdwardsY, SigningKey, VerifyingKey};
use rand_core::{OsRng, RngCore};

fn random_seed() -> [u8; 32] {
    let mut seed = [0u8; 32];
    OsRng.fill_bytes(&mut seed);
    seed
}

pub fn ed25519(c: &mut Criterion) {
    let mut group = c.benchmark_group("Ed25519");

    group.bench_function("keypair from seed", |b| {
        b.iter_batched(
            random_seed,
            |seed| SigningKey::from_seed(&seed),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("sign", |b| {
        b.iter_batched(
            || {
                let mut message = [0u8; 64];
                OsRng.fill_bytes(&mut message);
                (SigningKey::from_seed(&random_seed()), message)
            },
            |(key, message)| key.sign(&message),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("verify", |b| {
        b.iter_batched(
            || {
                let mut message = [0u8; 64];
                OsRng.fill_bytes(&mut message);
                let key = SigningKey::from_seed(&random_seed());
                let sig = key.sign(&message);
                (key.verifying_key(), message, sig)
            },
            |(vk, message, sig)| vk.verify_raw(&sig, &message),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("blind public key", |b| {
        b.iter_batched(
            || {
                let mut factor = [0u8; 32];
                OsRng.fill_bytes(&mut factor);
                (SigningKey::from_seed(&random_seed()).verifying_key(), factor)
            },
            |(vk, factor): (VerifyingKey, _)| vk.blind(&factor),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("key exchange", |b| {
        b.iter_batched(
            || {
                let alice = SigningKey::from_seed(&random_seed());
                let bob = *SigningKey::from_seed(&random_seed())
                    .verifying_key()
                    .as_compressed();
                (alice, bob)
            },
            |(alice, bob): (SigningKey, CompressedEdwardsY)| alice.key_exchange(&bob),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, ed25519);
criterion_main!(benches);
