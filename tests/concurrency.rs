use media_catalog::{Error, MediaDraft, MediaStore};
use std::sync::{Arc, Barrier};
use std::thread;

fn draft(name: &str, author: &str) -> MediaDraft {
    MediaDraft {
        name: Some(name.into()),
        publication_date: Some("1965-08-01".into()),
        author: Some(author.into()),
        category: Some("Book".into()),
    }
}

#[test]
fn concurrent_creates_of_same_name_have_one_winner() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MediaStore::open(dir.path().join("media.json")).unwrap());
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                store.create(draft("Dune", &format!("author {i}")))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let wins = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(Error::Conflict(_))))
        .count();
    assert_eq!(wins, 1);
    assert_eq!(conflicts, threads - 1);
    assert_eq!(store.len(), 1);

    let reloaded = MediaStore::open(store.path()).unwrap();
    assert_eq!(reloaded.list_all(), store.list_all());
}

#[test]
fn concurrent_distinct_creates_all_land_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MediaStore::open(dir.path().join("media.json")).unwrap());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.create(draft(&format!("Book {i}"), "x")).unwrap())
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(store.len(), 16);
    let reloaded = MediaStore::open(store.path()).unwrap();
    assert_eq!(reloaded.len(), 16);
}

#[test]
fn concurrent_deletes_of_same_name_have_one_winner() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MediaStore::open(dir.path().join("media.json")).unwrap());
    store.create(draft("Dune", "Frank Herbert")).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.delete("Dune"))
        })
        .collect();
    let oks = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|r| r.is_ok())
        .count();
    assert_eq!(oks, 1);
    assert!(store.is_empty());
}

#[test]
fn concurrent_flushes_never_collide() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MediaStore::open(dir.path().join("media.json")).unwrap());
    for i in 0..500 {
        store.create(draft(&format!("Book {i}"), "x")).unwrap();
    }
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..20).filter(|_| store.flush().is_err()).count()
            })
        })
        .collect();
    let failed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(failed, 0);

    let reloaded = MediaStore::open(store.path()).unwrap();
    assert_eq!(reloaded.len(), 500);
    assert!(!dir.path().join("media.json.tmp").exists());
}

#[test]
fn create_racing_delete_of_same_name_stays_consistent() {
    for _ in 0..20 {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MediaStore::open(dir.path().join("media.json")).unwrap());
        let barrier = Arc::new(Barrier::new(2));

        let creator = {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                store.create(draft("Dune", "Frank Herbert"))
            })
        };
        let deleter = {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                store.delete("Dune")
            })
        };

        let created = creator.join().unwrap().unwrap();
        match deleter.join().unwrap() {
            Ok(removed) => {
                assert_eq!(removed, created);
                assert!(store.is_empty());
            }
            Err(Error::NotFound(_)) => {
                assert_eq!(store.get("Dune").unwrap(), created);
            }
            Err(other) => panic!("unexpected delete error: {other}"),
        }

        let reloaded = MediaStore::open(store.path()).unwrap();
        assert_eq!(reloaded.list_all(), store.list_all());
    }
}
