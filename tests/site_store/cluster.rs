//! Cluster tests: one store per site, driven concurrently

use crate::common::*;
use std::sync::Arc;
use std::thread;

fn cluster(n: u32, sites: u32) -> Cluster {
    Cluster::new(StoreConfig::new(n, sites).unwrap()).unwrap()
}

#[test]
fn replicated_write_reaches_every_site() {
    let c = cluster(6, 3);
    let t1 = txn("T1");
    for site in c.sites_holding(x(2)).unwrap() {
        c.site(site).unwrap().stage(t1.clone(), x(2), 5).unwrap();
    }
    for site in c.config().sites() {
        c.site(site).unwrap().commit(&t1).unwrap();
    }
    for dump in c.dump() {
        assert_eq!(dump.value_of(x(2)), Some(5));
    }
}

#[test]
fn failure_only_affects_failed_site() {
    let c = cluster(4, 2);
    c.site(SiteId::new(1)).unwrap().stage("T1", x(2), 1).unwrap();
    c.site(SiteId::new(2)).unwrap().stage("T1", x(2), 1).unwrap();

    assert_eq!(c.fail_site(SiteId::new(1)).unwrap(), 1);
    assert!(c.site(SiteId::new(1)).unwrap().pending_transactions().is_empty());
    assert_eq!(c.site(SiteId::new(2)).unwrap().pending_transactions(), vec![txn("T1")]);
}

#[test]
fn recover_site_recomputes_flags() {
    let c = cluster(4, 2);
    c.fail_site(SiteId::new(2)).unwrap();
    c.recover_site(SiteId::new(2)).unwrap();

    let site2 = c.site(SiteId::new(2)).unwrap();
    assert!(site2.check_accessibility(x(1)).unwrap());
    assert!(site2.check_accessibility(x(3)).unwrap());
    assert!(!site2.check_accessibility(x(2)).unwrap());
    drop(site2);

    // site 1 never failed
    assert!(c.site(SiteId::new(1)).unwrap().check_accessibility(x(2)).unwrap());
}

#[test]
fn invalid_site_is_rejected() {
    let c = cluster(4, 2);
    assert!(c.fail_site(SiteId::new(9)).unwrap_err().is_invalid_site());
    assert!(c.recover_site(SiteId::new(0)).unwrap_err().is_invalid_site());
}

#[test]
fn sites_can_be_driven_from_separate_threads() {
    let c = Arc::new(cluster(20, 10));
    let handles: Vec<_> = c
        .config()
        .sites()
        .map(|site| {
            let c = Arc::clone(&c);
            thread::spawn(move || {
                for round in 0..50i64 {
                    let t = TransactionId::from(format!("T{}-{}", site.get(), round));
                    let mut store = c.site(site).unwrap();
                    store.stage(t.clone(), x(2), round).unwrap();
                    store.commit(&t).unwrap();
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    for dump in c.dump() {
        assert_eq!(dump.value_of(x(2)), Some(49));
    }
}
