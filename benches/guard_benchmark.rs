use criterion::{black_box, criterion_group, criterion_main, Criterion};

use custodia::core::guard;
use custodia::{Principal, Role, Status};

fn principal(roles: &[Role]) -> Principal {
    Principal {
        id: 1,
        username: "admin".into(),
        email: "admin@facility.gov".into(),
        roles: roles.iter().copied().collect(),
        status: Status::Active,
        token: "token".into(),
    }
}

pub fn decide(c: &mut Criterion) {
    let admin = principal(&[Role::Admin]);
    let medical = principal(&[Role::Medical]);

    let paths = [
        "/login",
        "/admin-dashboard",
        "/detainees/42",
        "/detainees/edit/42",
        "/planning",
        "/unknown",
    ];

    c.bench_function("decide_admin", |b| {
        b.iter(|| {
            for path in paths {
                black_box(guard::decide(Some(&admin), black_box(path)));
            }
        });
    });

    c.bench_function("decide_medical", |b| {
        b.iter(|| {
            for path in paths {
                black_box(guard::decide(Some(&medical), black_box(path)));
            }
        });
    });

    c.bench_function("decide_anonymous", |b| {
        b.iter(|| {
            for path in paths {
                black_box(guard::decide(None, black_box(path)));
            }
        });
    });
}

pub fn lookup(c: &mut Criterion) {
    c.bench_function("lookup_deep_path", |b| {
        b.iter(|| black_box(guard::lookup(black_box("/detainees/edit/42"))));
    });
}

criterion_group!(benches, decide, lookup);
criterion_main!(benches);
