use chrono::NaiveDate;
use rusqlite::Connection;
use sellerdb_core::{
    open_db_in_memory, DataAccessError, Department, DepartmentId, DepartmentRepository, Seller,
    SellerRepository, SqliteDepartmentRepository, SqliteSellerRepository,
};
use std::rc::Rc;

struct Fixture {
    conn: Connection,
    computers: DepartmentId,
    electronics: DepartmentId,
    books: DepartmentId,
}

fn fixture() -> Fixture {
    let conn = open_db_in_memory().unwrap();
    let (computers, electronics, books) = {
        let departments = SqliteDepartmentRepository::try_new(&conn).unwrap();
        let sellers = SqliteSellerRepository::try_new(&conn).unwrap();

        let computers = departments.insert(&mut Department::new("Computers")).unwrap();
        let electronics = departments
            .insert(&mut Department::new("Electronics"))
            .unwrap();
        let books = departments.insert(&mut Department::new("Books")).unwrap();

        for (name, department_id) in [
            ("Maria Green", electronics),
            ("Bob Brown", computers),
            ("Alex Pink", electronics),
            ("Alex Grey", computers),
            ("Carl Orange", electronics),
        ] {
            let mut seller = Seller::new(
                name,
                format!("{}@gmail.com", name.to_lowercase().replace(' ', ".")),
                NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
                1500.0,
                Department::reference(department_id),
            );
            sellers.insert(&mut seller).unwrap();
        }

        (computers, electronics, books)
    };

    Fixture {
        conn,
        computers,
        electronics,
        books,
    }
}

fn names(sellers: &[Seller]) -> Vec<&str> {
    sellers.iter().map(|seller| seller.name.as_str()).collect()
}

fn of_department(sellers: &[Seller], department_id: DepartmentId) -> Vec<&Seller> {
    sellers
        .iter()
        .filter(|seller| seller.department.id == Some(department_id))
        .collect()
}

#[test]
fn find_all_orders_by_name() {
    let fx = fixture();
    let repo = SqliteSellerRepository::try_new(&fx.conn).unwrap();

    let sellers = repo.find_all().unwrap();
    assert_eq!(
        names(&sellers),
        vec![
            "Alex Grey",
            "Alex Pink",
            "Bob Brown",
            "Carl Orange",
            "Maria Green"
        ]
    );
}

#[test]
fn find_all_shares_one_department_instance_per_id() {
    let fx = fixture();
    let repo = SqliteSellerRepository::try_new(&fx.conn).unwrap();

    let sellers = repo.find_all().unwrap();

    let electronics = of_department(&sellers, fx.electronics);
    assert_eq!(electronics.len(), 3);
    assert!(electronics
        .iter()
        .all(|seller| Rc::ptr_eq(&seller.department, &electronics[0].department)));
    assert_eq!(electronics[0].department.name, "Electronics");
    assert_eq!(Rc::strong_count(&electronics[0].department), 3);

    let computers = of_department(&sellers, fx.computers);
    assert_eq!(computers.len(), 2);
    assert!(Rc::ptr_eq(&computers[0].department, &computers[1].department));
    assert!(!Rc::ptr_eq(
        &computers[0].department,
        &electronics[0].department
    ));
}

#[test]
fn find_by_department_returns_matching_subset_of_find_all() {
    let fx = fixture();
    let repo = SqliteSellerRepository::try_new(&fx.conn).unwrap();

    let all = repo.find_all().unwrap();
    let electronics = repo
        .find_by_department(&Department::reference(fx.electronics))
        .unwrap();

    assert_eq!(
        names(&electronics),
        vec!["Alex Pink", "Carl Orange", "Maria Green"]
    );
    let expected = of_department(&all, fx.electronics);
    assert_eq!(electronics.iter().collect::<Vec<_>>(), expected);
    assert!(electronics
        .windows(2)
        .all(|pair| Rc::ptr_eq(&pair[0].department, &pair[1].department)));
}

#[test]
fn find_by_department_without_sellers_is_empty() {
    let fx = fixture();
    let repo = SqliteSellerRepository::try_new(&fx.conn).unwrap();

    let books = repo
        .find_by_department(&Department::reference(fx.books))
        .unwrap();
    assert!(books.is_empty());

    let unknown = repo
        .find_by_department(&Department::reference(999))
        .unwrap();
    assert!(unknown.is_empty());
}

#[test]
fn find_by_department_requires_department_id() {
    let fx = fixture();
    let repo = SqliteSellerRepository::try_new(&fx.conn).unwrap();

    let err = repo
        .find_by_department(&Department::new("Unsaved"))
        .unwrap_err();
    assert!(matches!(err, DataAccessError::MissingId("department.id")));
}

#[test]
fn separate_queries_do_not_share_departments() {
    let fx = fixture();
    let repo = SqliteSellerRepository::try_new(&fx.conn).unwrap();

    let first = repo.find_all().unwrap();
    let second = repo.find_all().unwrap();
    assert_eq!(first[0].department, second[0].department);
    assert!(!Rc::ptr_eq(&first[0].department, &second[0].department));
}
