//! 工具函数性能基准测试

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tinylinker::utils::url_validator::validate_url;
use tinylinker::utils::{generate_random_code, is_valid_short_code};

// ============== is_valid_short_code 基准测试 ==============

fn bench_is_valid_short_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/is_valid_short_code");

    group.bench_function("valid_simple", |b| {
        b.iter(|| {
            assert!(is_valid_short_code("abc123"));
        });
    });

    // 无效短码
    group.bench_function("invalid_empty", |b| {
        b.iter(|| {
            assert!(!is_valid_short_code(""));
        });
    });

    group.bench_function("invalid_special_chars", |b| {
        b.iter(|| {
            assert!(!is_valid_short_code("'; DROP TABLE--"));
        });
    });

    // 长度边界
    let max_len_code = "a".repeat(20);
    group.bench_function("valid_max_length", |b| {
        b.iter(|| {
            assert!(is_valid_short_code(&max_len_code));
        });
    });

    let too_long_code = "a".repeat(21);
    group.bench_function("invalid_too_long", |b| {
        b.iter(|| {
            assert!(!is_valid_short_code(&too_long_code));
        });
    });

    group.finish();
}

// ============== generate_random_code 基准测试 ==============

fn bench_generate_random_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/generate_random_code");

    for length in [3, 6, 12, 20] {
        group.bench_with_input(BenchmarkId::new("length", length), &length, |b, &length| {
            b.iter(|| {
                let code = generate_random_code(length);
                assert_eq!(code.len(), length);
            });
        });
    }

    group.finish();
}

// ============== validate_url 基准测试 ==============

fn bench_validate_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/validate_url");

    group.bench_function("valid_https", |b| {
        b.iter(|| {
            assert!(validate_url("https://example.com/path?query=1").is_ok());
        });
    });

    group.bench_function("valid_custom_scheme", |b| {
        b.iter(|| {
            assert!(validate_url("ftp://example.com/file.txt").is_ok());
        });
    });

    group.bench_function("invalid_relative", |b| {
        b.iter(|| {
            assert!(validate_url("not a url").is_err());
        });
    });

    group.bench_function("invalid_empty", |b| {
        b.iter(|| {
            assert!(validate_url("").is_err());
        });
    });

    let long_url = format!("https://example.com/{}", "a".repeat(1000));
    group.bench_function("valid_long_url", |b| {
        b.iter(|| {
            assert!(validate_url(&long_url).is_ok());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_is_valid_short_code,
    bench_generate_random_code,
    bench_validate_url,
);
criterion_main!(benches);
