use speculate2::speculate;

speculate! {
    use farmily_core::models::*;
    use farmily_core::{Database, Error};
    use uuid::Uuid;

    fn setup_db() -> Database {
        let db = Database::open_memory().expect("Failed to create test database");
        db.migrate().expect("Failed to migrate test database");
        db
    }

    fn create_test_person(db: &Database, first: &str, gender: Gender) -> Person {
        db.create_person(&PersonInput::new(first, "Doe", gender), ParentLinks::default(), None)
            .expect("Failed to create person")
    }

    fn relate(db: &Database, a: &Person, b: &Person, kind: RelationshipType) -> Relationship {
        db.create_relationship(&CreateRelationshipInput::new(a.id, b.id, kind))
            .expect("Failed to create relationship")
    }

    describe "create_relationship" {
        it "stores the edge in the given direction" {
            let db = setup_db();
            let jane = create_test_person(&db, "Jane", Gender::Female);
            let jim = create_test_person(&db, "Jim", Gender::Male);

            let mut input = CreateRelationshipInput::new(jane.id, jim.id, RelationshipType::Spouse);
            input.start_date = chrono::NaiveDate::from_ymd_opt(1990, 6, 1);
            input.notes = Some("Church wedding".into());
            let created = db.create_relationship(&input).unwrap();

            let stored = db.get_relationship(created.id).unwrap().unwrap();
            assert_eq!(stored.person1_id, jane.id);
            assert_eq!(stored.person2_id, jim.id);
            assert_eq!(stored.relationship_type, RelationshipType::Spouse);
            assert_eq!(stored.start_date, input.start_date);
            assert_eq!(stored.notes.as_deref(), Some("Church wedding"));
        }

        it "rejects an edge from a person to themselves" {
            let db = setup_db();
            let jane = create_test_person(&db, "Jane", Gender::Female);
            let result = db.create_relationship(&CreateRelationshipInput::new(
                jane.id,
                jane.id,
                RelationshipType::Sibling,
            ));
            assert!(matches!(result, Err(Error::Validation(_))));
        }

        it "rejects unknown relationship types" {
            let db = setup_db();
            let jane = create_test_person(&db, "Jane", Gender::Female);
            let jim = create_test_person(&db, "Jim", Gender::Male);

            let mut input = CreateRelationshipInput::new(jane.id, jim.id, RelationshipType::Spouse);
            input.relationship_type = "cousin".into();
            assert!(matches!(db.create_relationship(&input), Err(Error::Validation(_))));
        }

        it "reports missing people" {
            let db = setup_db();
            let jane = create_test_person(&db, "Jane", Gender::Female);
            let result = db.create_relationship(&CreateRelationshipInput::new(
                jane.id,
                Uuid::new_v4(),
                RelationshipType::Sibling,
            ));
            assert!(matches!(result, Err(Error::NotFound(_))));
        }

        it "rejects duplicates in either direction" {
            let db = setup_db();
            let jane = create_test_person(&db, "Jane", Gender::Female);
            let jim = create_test_person(&db, "Jim", Gender::Male);
            relate(&db, &jane, &jim, RelationshipType::Spouse);
            relate(&db, &jane, &jim, RelationshipType::Parent);

            for (a, b, kind) in [
                (&jane, &jim, RelationshipType::Spouse),
                (&jim, &jane, RelationshipType::Spouse),
                (&jane, &jim, RelationshipType::Parent),
                (&jim, &jane, RelationshipType::Child),
            ] {
                let result = db.create_relationship(&CreateRelationshipInput::new(a.id, b.id, kind));
                assert!(matches!(result, Err(Error::Conflict(_))), "{:?} accepted", kind);
            }
        }
    }

    describe "delete_relationship" {
        it "removes the edge" {
            let db = setup_db();
            let jane = create_test_person(&db, "Jane", Gender::Female);
            let jim = create_test_person(&db, "Jim", Gender::Male);
            let rel = relate(&db, &jane, &jim, RelationshipType::Sibling);

            assert!(db.delete_relationship(rel.id).unwrap());
            assert!(db.get_relationship(rel.id).unwrap().is_none());
        }

        it "succeeds for unknown ids" {
            let db = setup_db();
            assert!(!db.delete_relationship(Uuid::new_v4()).unwrap());
        }
    }

    describe "list_relationships_for_person" {
        it "labels what the other person is to the viewer" {
            let db = setup_db();
            let dad = create_test_person(&db, "Dad", Gender::Male);
            let kid = create_test_person(&db, "Kid", Gender::Female);
            // kid is child of dad
            relate(&db, &kid, &dad, RelationshipType::Child);

            let from_kid = db.list_relationships_for_person(kid.id).unwrap();
            assert_eq!(from_kid.len(), 1);
            assert_eq!(from_kid[0].relationship_type, RelationshipType::Parent);

            let from_dad = db.list_relationships_for_person(dad.id).unwrap();
            assert_eq!(from_dad.len(), 1);
            assert_eq!(from_dad[0].relationship_type, RelationshipType::Child);
        }

        it "inverts parent edges stored from the viewer's side" {
            let db = setup_db();
            let mom = create_test_person(&db, "Mom", Gender::Female);
            let kid = create_test_person(&db, "Kid", Gender::Male);
            // mom is parent of kid
            relate(&db, &mom, &kid, RelationshipType::Parent);

            let from_mom = db.list_relationships_for_person(mom.id).unwrap();
            assert_eq!(from_mom[0].relationship_type, RelationshipType::Child);

            let from_kid = db.list_relationships_for_person(kid.id).unwrap();
            assert_eq!(from_kid[0].relationship_type, RelationshipType::Parent);
        }

        it "leaves symmetric types alone from either side" {
            let db = setup_db();
            let a = create_test_person(&db, "Ann", Gender::Female);
            let b = create_test_person(&db, "Bob", Gender::Male);
            let c = create_test_person(&db, "Cal", Gender::Male);
            relate(&db, &a, &b, RelationshipType::Spouse);
            relate(&db, &c, &a, RelationshipType::Sibling);

            let from_a = db.list_relationships_for_person(a.id).unwrap();
            let kinds: Vec<RelationshipType> = from_a.iter().map(|r| r.relationship_type).collect();
            assert_eq!(kinds, vec![RelationshipType::Sibling, RelationshipType::Spouse]);

            let from_b = db.list_relationships_for_person(b.id).unwrap();
            assert_eq!(from_b[0].relationship_type, RelationshipType::Spouse);
        }

        it "lists newest first with names and genders of both ends" {
            let db = setup_db();
            let a = create_test_person(&db, "Ann", Gender::Female);
            let b = create_test_person(&db, "Bob", Gender::Male);
            let c = create_test_person(&db, "Cal", Gender::Other);
            let first = relate(&db, &a, &b, RelationshipType::Sibling);
            let second = relate(&db, &a, &c, RelationshipType::Sibling);

            let views = db.list_relationships_for_person(a.id).unwrap();
            assert_eq!(views.iter().map(|v| v.id).collect::<Vec<_>>(), vec![second.id, first.id]);
            assert_eq!(views[0].person1_name, "Ann Doe");
            assert_eq!(views[0].person2_name, "Cal Doe");
            assert_eq!(views[0].person2_gender, Gender::Other);
        }

        it "does not persist the display label" {
            let db = setup_db();
            let dad = create_test_person(&db, "Dad", Gender::Male);
            let kid = create_test_person(&db, "Kid", Gender::Female);
            let rel = relate(&db, &kid, &dad, RelationshipType::Child);

            db.list_relationships_for_person(kid.id).unwrap();
            let stored = db.get_relationship(rel.id).unwrap().unwrap();
            assert_eq!(stored.relationship_type, RelationshipType::Child);
        }

        it "is empty for a person without relationships" {
            let db = setup_db();
            let a = create_test_person(&db, "Ann", Gender::Female);
            assert!(db.list_relationships_for_person(a.id).unwrap().is_empty());
        }
    }
}
