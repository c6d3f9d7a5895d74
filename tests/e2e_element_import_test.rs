// ==========================================
// EventFab Element Import - End-to-End Import Tests
// ==========================================
// Worksheet file -> committed import -> query-back through the
// repository.
// ==========================================

mod test_helpers;

use eventfab_import::importer::{ElementImporter, ElementImporterImpl, UniversalFileParser};
use eventfab_import::repository::{ElementImportRepository, ElementImportRepositoryImpl};
use test_helpers::MockConfigReader;

const CSV: &str = "element_id,element_type,element_name,category,width_m,length_m,height_m,\
particular_description,unit,quantity,included,notes\n\
E001,stage,Main Stage,production,6,8,0.6,Stage Boards,pcs,8,YES,\n\
,,,,,,,Stage Legs,pcs,16,NO,spares\n\
E002,backdrop,Backdrop 1,hire,3,4,0,Fabric,mtrs,12,YES,\n";

fn build_importer(
    db_path: &str,
) -> ElementImporterImpl<ElementImportRepositoryImpl, MockConfigReader> {
    let repo = ElementImportRepositoryImpl::new(db_path).expect("open repository");
    ElementImporterImpl::new(
        repo,
        MockConfigReader::default(),
        Box::new(UniversalFileParser::new()),
    )
}

#[tokio::test]
async fn test_import_persists_elements_and_batch() {
    let (_db_file, db_path) = test_helpers::create_test_db().expect("test db");
    let importer = build_importer(&db_path);
    let file = test_helpers::create_test_csv(CSV).expect("temp csv");

    let outcome = importer
        .import_from_file(file.path(), "PRJ-2024-031")
        .await
        .expect("import");

    assert_eq!(outcome.persisted_elements, 2);
    assert_eq!(outcome.batch.element_count, 2);
    assert_eq!(outcome.batch.particular_count, 3);
    assert_eq!(outcome.batch.error_count, 0);
    assert_eq!(outcome.batch.imported_by.as_deref(), Some("test-runner"));

    // Query back through a fresh repository connection.
    let repo = ElementImportRepositoryImpl::new(&db_path).expect("open repository");

    let batch = repo
        .get_batch(&outcome.batch.batch_id)
        .await
        .expect("get batch")
        .expect("batch exists");
    assert_eq!(batch.project_id.as_deref(), Some("PRJ-2024-031"));
    assert_eq!(batch.total_rows, 3);
    assert!(batch.report_json.is_some());

    let elements = repo
        .get_elements_by_project("PRJ-2024-031")
        .await
        .expect("get elements");
    assert_eq!(elements.len(), 2);

    let stage = &elements[0];
    assert_eq!(stage.id, "E001");
    assert_eq!(stage.dimensions.width, 6.0);
    assert_eq!(stage.particulars.len(), 2);
    assert_eq!(stage.particulars[1].description, "Stage Legs");
    assert!(!stage.particulars[1].included);
    assert_eq!(stage.particulars[1].notes.as_deref(), Some("spares"));

    assert_eq!(elements[1].id, "E002");
    assert_eq!(elements[1].category, "hire");
}

#[tokio::test]
async fn test_import_with_errors_still_persists_valid_elements() {
    let (_db_file, db_path) = test_helpers::create_test_db().expect("test db");
    let importer = build_importer(&db_path);

    // E001 has a bad category and is dropped; E002 is intact.
    let csv = "element_id,element_type,element_name,category,width_m,length_m,height_m,\
particular_description,unit,quantity,included,notes\n\
E001,stage,Main Stage,purchase,6,8,0.6,Stage Boards,pcs,8,YES,\n\
E002,backdrop,Backdrop 1,hire,3,4,0,Fabric,mtrs,12,YES,\n";
    let file = test_helpers::create_test_csv(csv).expect("temp csv");

    let outcome = importer
        .import_from_file(file.path(), "PRJ-2024-032")
        .await
        .expect("import");

    assert_eq!(outcome.persisted_elements, 1);
    assert!(outcome.batch.error_count > 0);

    let repo = ElementImportRepositoryImpl::new(&db_path).expect("open repository");
    let elements = repo
        .get_elements_by_project("PRJ-2024-032")
        .await
        .expect("get elements");
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].id, "E002");
}

#[tokio::test]
async fn test_batch_import_isolates_failures() {
    let (_db_file, db_path) = test_helpers::create_test_db().expect("test db");
    let importer = build_importer(&db_path);

    let good = test_helpers::create_test_csv(CSV).expect("temp csv");
    let missing = std::path::PathBuf::from("no_such_worksheet.csv");

    let results = importer
        .batch_import(
            vec![good.path().to_path_buf(), missing],
            "PRJ-2024-033",
        )
        .await
        .expect("batch import");

    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());

    // The failing file must not roll back the good one.
    let repo = ElementImportRepositoryImpl::new(&db_path).expect("open repository");
    let elements = repo
        .get_elements_by_project("PRJ-2024-033")
        .await
        .expect("get elements");
    assert_eq!(elements.len(), 2);
}

#[tokio::test]
async fn test_two_imports_two_batches() {
    let (_db_file, db_path) = test_helpers::create_test_db().expect("test db");
    let importer = build_importer(&db_path);
    let file = test_helpers::create_test_csv(CSV).expect("temp csv");

    let first = importer
        .import_from_file(file.path(), "PRJ-2024-034")
        .await
        .expect("first import");
    let second = importer
        .import_from_file(file.path(), "PRJ-2024-034")
        .await
        .expect("second import");

    assert_ne!(first.batch.batch_id, second.batch.batch_id);

    let repo = ElementImportRepositoryImpl::new(&db_path).expect("open repository");
    let batches = repo.list_recent_batches(10).await.expect("list batches");
    assert_eq!(batches.len(), 2);

    // Reports are content-identical across the two runs.
    assert_eq!(first.batch.report_json, second.batch.report_json);
}
