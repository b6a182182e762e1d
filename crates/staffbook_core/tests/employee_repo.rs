use staffbook_core::db::open_db_in_memory;
use staffbook_core::{
    Department, Employee, EmployeeDraft, EmployeeRegistry, EmployeeRepository, EmployeeStatus,
    KvEmployeeRepository, KvStore, MemoryKvStore, Position, RepoError, SqliteKvStore, StoreError,
    STORAGE_KEY,
};

fn employee(id: &str, name: &str, salary: f64) -> Employee {
    Employee {
        id: id.to_string(),
        name: name.to_string(),
        position: Position::Senior,
        department: Department::Marketing,
        salary,
        status: EmployeeStatus::Active,
    }
}

#[test]
fn load_all_on_empty_store_returns_empty() {
    let repo = KvEmployeeRepository::new(MemoryKvStore::new());
    assert!(repo.load_all().is_empty());
}

#[test]
fn save_all_writes_json_array_under_default_key() {
    let mut repo = KvEmployeeRepository::new(MemoryKvStore::new());
    repo.save_all(&[employee("NV1", "An", 10.0)]).unwrap();

    let raw = repo.store().get(STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value.is_array());
    assert_eq!(value[0]["id"], "NV1");
    assert_eq!(value[0]["position"], "Chuyên viên cao cấp");
    assert_eq!(value[0]["status"], "Đang làm việc");
}

#[test]
fn load_save_load_is_idempotent() {
    let mut repo = KvEmployeeRepository::new(MemoryKvStore::new());
    let original = vec![employee("NV1", "An", 10.0), employee("NV2", "Binh", 20.5)];
    repo.save_all(&original).unwrap();

    let first = repo.load_all();
    repo.save_all(&first).unwrap();
    let second = repo.load_all();

    assert_eq!(first, original);
    assert_eq!(second, first);
}

#[test]
fn malformed_content_loads_as_empty() {
    let mut store = MemoryKvStore::new();
    store.set(STORAGE_KEY, "{not json").unwrap();
    assert!(KvEmployeeRepository::new(store).load_all().is_empty());

    let mut store = MemoryKvStore::new();
    store.set(STORAGE_KEY, r#"{"id":"NV1"}"#).unwrap();
    assert!(KvEmployeeRepository::new(store).load_all().is_empty());
}

#[test]
fn structurally_invalid_record_makes_whole_blob_malformed() {
    let mut store = MemoryKvStore::new();
    store
        .set(
            STORAGE_KEY,
            r#"[
                {"id":"NV1","name":"An","position":"Nhân viên","department":"Nhân sự","salary":1,"status":"Thử việc"},
                {"id":"NV2","name":"Binh","position":"Nhân viên","department":"Nhân sự","salary":-1,"status":"Thử việc"}
            ]"#,
        )
        .unwrap();

    assert!(KvEmployeeRepository::new(store).load_all().is_empty());
}

#[test]
fn save_all_surfaces_quota_failure() {
    let mut repo = KvEmployeeRepository::new(MemoryKvStore::with_quota(16));

    let err = repo
        .save_all(&[employee("NV1", "Nguyen Van A", 5_000_000.0)])
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Persistence(StoreError::QuotaExceeded { limit: 16, .. })
    ));
    assert!(repo.load_all().is_empty());
}

#[test]
fn custom_key_isolates_collections() {
    let mut store = MemoryKvStore::new();
    {
        let mut repo = KvEmployeeRepository::with_key(&mut store, "employees_backup");
        assert_eq!(repo.key(), "employees_backup");
        repo.save_all(&[employee("NV9", "Chi", 1.0)]).unwrap();
    }

    assert_eq!(store.get(STORAGE_KEY).unwrap(), None);
    assert!(store.get("employees_backup").unwrap().is_some());
}

#[test]
fn sqlite_backed_repository_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();
    let mut repo = KvEmployeeRepository::new(store);

    let collection = vec![employee("NV1", "Đỗ Quang", 7_500_000.0)];
    repo.save_all(&collection).unwrap();

    assert_eq!(repo.load_all(), collection);
}

#[test]
fn legacy_names_outside_input_rules_survive_load_and_add() {
    let mut store = MemoryKvStore::new();
    store
        .set(
            STORAGE_KEY,
            r#"[
                {"id":"NV10000001","name":"Lê Thị-Hoa","position":"Nhân viên","department":"Nhân sự","salary":9000000,"status":"Đang làm việc"},
                {"id":"NV10000002","name":"O'Brien","position":"Quản lý","department":"Marketing","salary":20000000,"status":"Nghỉ phép"}
            ]"#,
        )
        .unwrap();

    let mut registry = EmployeeRegistry::new(KvEmployeeRepository::new(&mut store));
    assert_eq!(registry.list().len(), 2);

    registry
        .add(EmployeeDraft {
            name: "Tran B".to_string(),
            position: Position::Intern,
            department: Department::It,
            salary: 1.0,
            status: EmployeeStatus::Probation,
        })
        .unwrap();
    drop(registry);

    let reloaded = KvEmployeeRepository::new(&mut store).load_all();
    let names: Vec<_> = reloaded.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["Lê Thị-Hoa", "O'Brien", "Tran B"]);
}
