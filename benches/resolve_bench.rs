use criterion::*;
use ldp_models::{ModelMixin, RdfMetadata, TypeManager};
use ldp_models::model::fields::FieldDef;
use ldp_models::model::typemgr::Handles;
use ldp_models::vocab::dc;

fn model_type(i: usize) -> String {
  format!("http://cesnet.cz/ns/repository/type#Model{}", i)
}

pub fn type_resolution(c: &mut Criterion) {
  let types = TypeManager::new();
  for i in 0..50 {
    types.register(ModelMixin::new(
      format!("Model{}", i),
      model_type(i),
      Handles::TypeMatch((i % 7) as u32),
      vec![FieldDef::text(dc::TITLE)],
    ));
  }
  let mut md = RdfMetadata::new();
  md.add_type(&model_type(25));
  let type_set: Vec<String> = (0..8).map(model_type).collect();

  let mut group = c.benchmark_group("type_resolution");
  group.sample_size(10);
  group.bench_function("TypeManager::resolve() over 50 registered models",
    |b| b.iter(|| types.resolve(black_box(&md)))
  );
  group.bench_function("TypeManager::generate_class() cache hit, 8 contributing mixins",
    |b| b.iter(|| types.generate_class(black_box(&type_set)))
  );
  group.finish();
}

criterion_group!(benches, type_resolution);
criterion_main!(benches);
