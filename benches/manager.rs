use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tokio::runtime::Runtime;
use vouchers::{Amount, MemoryStore, Operation, VoucherManager};

/// Generates a create followed by applications for each voucher.
///
/// Pattern per voucher:
/// 1. Create with a discount between 1 and 100
/// 2. Apply below the minimum (declined)
/// 3. Apply at 200 (applied)
/// 4. Apply again (already used)
pub struct OpGenerator {
    num_vouchers: u32,
    current: u32,
    step: u8,
}

impl OpGenerator {
    pub fn new(num_vouchers: u32) -> Self {
        Self {
            num_vouchers,
            current: 0,
            step: 0,
        }
    }
}

impl Iterator for OpGenerator {
    type Item = Operation;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.num_vouchers {
            return None;
        }

        let code = format!("CODE{}", self.current);
        let op = match self.step {
            0 => Operation::Create {
                code,
                discount: self.current % 100 + 1,
            },
            1 => Operation::Apply {
                code,
                amount: Amount::from_whole(50),
            },
            _ => Operation::Apply {
                code,
                amount: Amount::from_whole(200),
            },
        };

        self.step += 1;
        if self.step > 3 {
            self.step = 0;
            self.current += 1;
        }

        Some(op)
    }
}

fn bench_lifecycle(c: &mut Criterion) {
    let rt = Runtime::new().expect("failed to build runtime");
    let mut group = c.benchmark_group("lifecycle");

    for count in [1_000u32, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                rt.block_on(async {
                    let manager = VoucherManager::new(MemoryStore::new());
                    for op in OpGenerator::new(count) {
                        let _ = black_box(manager.execute(op).await);
                    }
                    manager
                })
            });
        });
    }

    group.finish();
}

fn bench_run_stream(c: &mut Criterion) {
    let rt = Runtime::new().expect("failed to build runtime");
    let mut group = c.benchmark_group("run");
    group.sample_size(10);

    group.bench_function("100k_ops", |b| {
        b.iter(|| {
            rt.block_on(async {
                let manager = VoucherManager::new(MemoryStore::new());
                let ops = tokio_stream::iter(OpGenerator::new(25_000));
                black_box(manager.run(ops).await)
            })
        });
    });

    group.finish();
}

criterion_group!(benches, bench_lifecycle, bench_run_stream);
criterion_main!(benches);
