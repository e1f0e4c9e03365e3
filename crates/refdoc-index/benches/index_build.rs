//! Benchmarks for index construction and reference resolution.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use refdoc_index::{CodeIndex, ErrorCollector, HasTagApi, Resolver, Scope};
use refdoc_reflect::{
    ClassKind, MockReflector, ReflectedClass, ReflectedMethod, ReflectedParameter,
    ReflectedProperty,
};

/// Create a namespace with `modules` sub-namespaces of `classes` classes each.
fn create_namespace(modules: usize, classes: usize) -> MockReflector {
    let mut reflector = MockReflector::new();
    for m in 0..modules {
        for c in 0..classes {
            let name = format!("Acme\\Module{m}\\Class{c}");
            let mut class = ReflectedClass::new(&name, ClassKind::Class)
                .with_property(ReflectedProperty::new("state", &name).with_type("int"));
            if c > 0 {
                class = class.with_parent(format!("Acme\\Module{m}\\Class{}", c - 1));
            }
            for i in 0..10 {
                class = class.with_method(
                    ReflectedMethod::new(format!("method{i}"), &name)
                        .with_parameter(ReflectedParameter::new("input", 0).with_type("string"))
                        .with_return_type(format!("?Class{c}"))
                        .with_doc(format!(
                            "/**\n * Method {i}.\n *\n * @throws \\RuntimeException\n * @api\n */"
                        )),
                );
            }
            reflector = reflector.with_class(class);
        }
    }
    reflector
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");

    for (modules, classes) in [(2, 10), (5, 20), (10, 40)] {
        let reflector = create_namespace(modules, classes);
        group.bench_with_input(
            BenchmarkId::new("build", format!("m{modules}_c{classes}")),
            &reflector,
            |b, reflector| b.iter(|| CodeIndex::build(reflector, "Acme", &HasTagApi)),
        );
    }

    group.finish();
}

fn bench_resolution(c: &mut Criterion) {
    let reflector = create_namespace(5, 20);
    let index = CodeIndex::build(&reflector, "Acme", &HasTagApi).unwrap();
    let errors = ErrorCollector::new();
    let resolver = Resolver::new(&index, &errors);
    let class = index.get_class_wrapper("Acme\\Module3\\Class7").unwrap();
    let scope = Scope::for_class(class);

    let mut group = c.benchmark_group("resolution");

    group.bench_function("internal_member", |b| {
        b.iter(|| resolver.resolve("Class6::method3()", &scope, "bench"))
    });

    group.bench_function("external_class", |b| {
        b.iter(|| resolver.resolve("\\RuntimeException", &scope, "bench"))
    });

    group.bench_function("type_expression", |b| {
        b.iter(|| resolver.resolve_type_expression("?Class6|Class5[]|null", &scope, "bench"))
    });

    group.bench_function("signature", |b| b.iter(|| class.signature(true)));

    group.finish();
}

criterion_group!(benches, bench_index_build, bench_resolution);
criterion_main!(benches);
