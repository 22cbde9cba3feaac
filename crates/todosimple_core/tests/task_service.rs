use todosimple_core::db::open_db_in_memory;
use todosimple_core::{sqlite_services, ServiceError, Task, User, UserId};

fn seed_user(conn: &rusqlite::Connection, username: &str) -> UserId {
    let (users, _) = sqlite_services(conn);
    users
        .create(&User::new(username, "secret123"))
        .unwrap()
        .id
        .unwrap()
}

#[test]
fn create_binds_resolved_owner_and_assigns_id() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let (_, tasks) = sqlite_services(&conn);

    let mut input = Task::new("buy milk", alice);
    input.id = Some(77);
    let created = tasks.create(&input).unwrap();

    assert_ne!(created.id, Some(77));
    assert_eq!(created.user.id, alice);
    assert_eq!(created.user.username.as_deref(), Some("alice"));
    assert_eq!(tasks.find_by_id(created.id.unwrap()).unwrap(), created);
}

#[test]
fn create_for_unknown_user_is_not_found_and_persists_nothing() {
    let conn = open_db_in_memory().unwrap();
    let (_, tasks) = sqlite_services(&conn);

    let before = tasks.find_all_by_user_id(5).unwrap().len();
    let err = tasks.create(&Task::new("orphan", 5)).unwrap_err();

    assert!(matches!(err, ServiceError::UserNotFound(5)));
    assert_eq!(tasks.find_all_by_user_id(5).unwrap().len(), before);
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM task;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 0);
}

#[test]
fn create_rejects_blank_description_before_owner_lookup() {
    let conn = open_db_in_memory().unwrap();
    let (_, tasks) = sqlite_services(&conn);

    assert!(matches!(
        tasks.create(&Task::new("", 5)).unwrap_err(),
        ServiceError::Validation(_)
    ));
}

#[test]
fn find_missing_task_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let (_, tasks) = sqlite_services(&conn);

    assert!(matches!(
        tasks.find_by_id(1).unwrap_err(),
        ServiceError::TaskNotFound(1)
    ));
}

#[test]
fn find_all_by_user_id_lists_only_that_users_tasks() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let bob = seed_user(&conn, "bob");
    let (_, tasks) = sqlite_services(&conn);

    tasks.create(&Task::new("one", alice)).unwrap();
    tasks.create(&Task::new("bob's", bob)).unwrap();
    tasks.create(&Task::new("two", alice)).unwrap();

    let listed = tasks.find_all_by_user_id(alice).unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|task| task.user.id == alice));
}

#[test]
fn find_all_by_unknown_user_is_empty_not_an_error() {
    let conn = open_db_in_memory().unwrap();
    let (_, tasks) = sqlite_services(&conn);

    assert!(tasks.find_all_by_user_id(1234).unwrap().is_empty());
}

#[test]
fn update_changes_description_but_never_owner() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let bob = seed_user(&conn, "bob");
    let (_, tasks) = sqlite_services(&conn);

    let created = tasks.create(&Task::new("buy milk", alice)).unwrap();
    let mut change = Task::new("buy oat milk", bob);
    change.id = created.id;

    let updated = tasks.update(&change).unwrap();
    assert_eq!(updated.description, "buy oat milk");
    assert_eq!(updated.user.id, alice);

    let loaded = tasks.find_by_id(created.id.unwrap()).unwrap();
    assert_eq!(loaded.description, "buy oat milk");
    assert_eq!(loaded.user.id, alice);
    assert!(tasks.find_all_by_user_id(bob).unwrap().is_empty());
}

#[test]
fn update_missing_task_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let (_, tasks) = sqlite_services(&conn);

    let mut change = Task::new("anything", 1);
    change.id = Some(6);
    assert!(matches!(
        tasks.update(&change).unwrap_err(),
        ServiceError::TaskNotFound(6)
    ));
}

#[test]
fn delete_task_then_lookup_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let (_, tasks) = sqlite_services(&conn);

    let id = tasks
        .create(&Task::new("buy milk", alice))
        .unwrap()
        .id
        .unwrap();
    tasks.delete(id).unwrap();

    assert!(matches!(
        tasks.find_by_id(id).unwrap_err(),
        ServiceError::TaskNotFound(_)
    ));
    assert!(matches!(
        tasks.delete(id).unwrap_err(),
        ServiceError::TaskNotFound(_)
    ));
}
