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

    fn create_test_person(db: &Database, first: &str, last: &str, gender: Gender) -> Person {
        db.create_person(&PersonInput::new(first, last, gender), ParentLinks::default(), None)
            .expect("Failed to create person")
    }

    fn child_edges(db: &Database, person_id: Uuid) -> Vec<String> {
        db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT person2_id FROM relationships
                 WHERE person1_id = ?1 AND relationship_type = 'child'
                 ORDER BY person2_id",
            )?;
            let ids = stmt
                .query_map([person_id.to_string()], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<String>>>()?;
            Ok(ids)
        })
        .unwrap()
    }

    fn count_rows(db: &Database, table: &str, person_id: Uuid) -> i64 {
        let sql = match table {
            "relationships" => {
                "SELECT COUNT(*) FROM relationships WHERE person1_id = ?1 OR person2_id = ?1"
            }
            "events" => "SELECT COUNT(*) FROM events WHERE person_id = ?1",
            "media" => "SELECT COUNT(*) FROM media WHERE person_id = ?1",
            "notes" => "SELECT COUNT(*) FROM notes WHERE person_id = ?1",
            other => panic!("unexpected table {}", other),
        };
        db.with_connection(|conn| Ok(conn.query_row(sql, [person_id.to_string()], |r| r.get(0))?))
            .unwrap()
    }

    describe "create_person" {
        it "stores the person and returns it" {
            let db = setup_db();
            let person = create_test_person(&db, "Ada", "Lovelace", Gender::Female);

            let found = db.get_person(person.id).unwrap().expect("person should exist");
            assert_eq!(found.first_name, "Ada");
            assert_eq!(found.last_name, "Lovelace");
            assert_eq!(found.gender, Gender::Female);
            assert!(found.is_living);
        }

        it "rejects missing required fields without writing" {
            let db = setup_db();
            let mut input = PersonInput::new("Ada", "", Gender::Female);
            let result = db.create_person(&input, ParentLinks::default(), None);
            assert!(matches!(result, Err(Error::Validation(_))));

            input.last_name = "Lovelace".into();
            input.gender = "Unknown".into();
            let result = db.create_person(&input, ParentLinks::default(), None);
            assert!(matches!(result, Err(Error::Validation(_))));

            assert!(db.list_people().unwrap().is_empty());
        }

        it "links both parents as child edges" {
            let db = setup_db();
            let father = create_test_person(&db, "John", "Smith", Gender::Male);
            let mother = create_test_person(&db, "Mary", "Smith", Gender::Female);

            let parents = ParentLinks { father: Some(father.id), mother: Some(mother.id) };
            let child = db
                .create_person(&PersonInput::new("Tom", "Smith", Gender::Male), parents, None)
                .unwrap();

            let mut expected = vec![father.id.to_string(), mother.id.to_string()];
            expected.sort();
            assert_eq!(child_edges(&db, child.id), expected);
        }

        it "rolls back the person when a parent does not exist" {
            let db = setup_db();
            let father = create_test_person(&db, "John", "Smith", Gender::Male);

            let parents = ParentLinks { father: Some(father.id), mother: Some(Uuid::new_v4()) };
            let result = db.create_person(&PersonInput::new("Tom", "Smith", Gender::Male), parents, None);
            assert!(matches!(result, Err(Error::NotFound(_))));

            let people = db.list_people().unwrap();
            assert_eq!(people.len(), 1);
            assert_eq!(people[0].id, father.id);
            assert_eq!(count_rows(&db, "relationships", father.id), 0);
        }

        it "records the creating user" {
            let db = setup_db();
            let user = db.create_user(NewUser {
                email: "ada@example.com".into(),
                password_hash: "hash".into(),
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
            }).unwrap();

            let person = db
                .create_person(&PersonInput::new("Tom", "Smith", Gender::Male), ParentLinks::default(), Some(user.id))
                .unwrap();

            assert_eq!(db.get_person(person.id).unwrap().unwrap().created_by, Some(user.id));
        }
    }

    describe "update_person" {
        it "replaces parent links with the supplied set" {
            let db = setup_db();
            let father = create_test_person(&db, "John", "Smith", Gender::Male);
            let mother = create_test_person(&db, "Mary", "Smith", Gender::Female);
            let child = db
                .create_person(
                    &PersonInput::new("Tom", "Smith", Gender::Male),
                    ParentLinks { father: Some(father.id), mother: None },
                    None,
                )
                .unwrap();

            db.update_person(
                child.id,
                &PersonInput::new("Tom", "Smith", Gender::Male),
                ParentLinks { father: None, mother: Some(mother.id) },
            )
            .unwrap();

            assert_eq!(child_edges(&db, child.id), vec![mother.id.to_string()]);
            assert_eq!(count_rows(&db, "relationships", father.id), 0);
        }

        it "overwrites every field" {
            let db = setup_db();
            let person = create_test_person(&db, "Tom", "Smith", Gender::Male);

            let mut input = PersonInput::new("Thomas", "Smyth", Gender::Other);
            input.occupation = Some("Miller".into());
            input.is_living = false;
            db.update_person(person.id, &input, ParentLinks::default()).unwrap();

            let updated = db.get_person(person.id).unwrap().unwrap();
            assert_eq!(updated.first_name, "Thomas");
            assert_eq!(updated.last_name, "Smyth");
            assert_eq!(updated.gender, Gender::Other);
            assert_eq!(updated.occupation.as_deref(), Some("Miller"));
            assert!(!updated.is_living);
        }

        it "leaves the row untouched when a parent is missing" {
            let db = setup_db();
            let father = create_test_person(&db, "John", "Smith", Gender::Male);
            let child = db
                .create_person(
                    &PersonInput::new("Tom", "Smith", Gender::Male),
                    ParentLinks { father: Some(father.id), mother: None },
                    None,
                )
                .unwrap();

            let result = db.update_person(
                child.id,
                &PersonInput::new("Changed", "Name", Gender::Male),
                ParentLinks { father: None, mother: Some(Uuid::new_v4()) },
            );
            assert!(matches!(result, Err(Error::NotFound(_))));

            let unchanged = db.get_person(child.id).unwrap().unwrap();
            assert_eq!(unchanged.first_name, "Tom");
            assert_eq!(child_edges(&db, child.id), vec![father.id.to_string()]);
        }

        it "reports unknown people" {
            let db = setup_db();
            let result = db.update_person(
                Uuid::new_v4(),
                &PersonInput::new("Tom", "Smith", Gender::Male),
                ParentLinks::default(),
            );
            assert!(matches!(result, Err(Error::NotFound(_))));
        }

        it "refuses to make a person their own parent" {
            let db = setup_db();
            let person = create_test_person(&db, "Tom", "Smith", Gender::Male);
            let result = db.update_person(
                person.id,
                &PersonInput::new("Tom", "Smith", Gender::Male),
                ParentLinks { father: Some(person.id), mother: None },
            );
            assert!(matches!(result, Err(Error::Validation(_))));
        }

        it "takes over a parent link stored from the parent's side" {
            let db = setup_db();
            let father = create_test_person(&db, "John", "Smith", Gender::Male);
            let child = create_test_person(&db, "Tom", "Smith", Gender::Male);
            db.create_relationship(&CreateRelationshipInput::new(
                father.id,
                child.id,
                RelationshipType::Parent,
            ))
            .unwrap();

            db.update_person(
                child.id,
                &PersonInput::new("Tom", "Smith", Gender::Male),
                ParentLinks { father: Some(father.id), mother: None },
            )
            .unwrap();

            let labels: Vec<RelationshipType> = db
                .list_relationships_for_person(child.id)
                .unwrap()
                .iter()
                .map(|r| r.relationship_type)
                .collect();
            assert_eq!(labels, vec![RelationshipType::Parent]);
            assert_eq!(child_edges(&db, child.id), vec![father.id.to_string()]);

            db.update_person(
                child.id,
                &PersonInput::new("Tom", "Smith", Gender::Male),
                ParentLinks::default(),
            )
            .unwrap();
            assert_eq!(count_rows(&db, "relationships", child.id), 0);
        }

        it "keeps unrelated relationships when parents change" {
            let db = setup_db();
            let person = create_test_person(&db, "Tom", "Smith", Gender::Male);
            let spouse = create_test_person(&db, "Sue", "Smith", Gender::Female);
            db.create_relationship(&CreateRelationshipInput::new(
                person.id,
                spouse.id,
                RelationshipType::Spouse,
            ))
            .unwrap();

            db.update_person(
                person.id,
                &PersonInput::new("Tom", "Smith", Gender::Male),
                ParentLinks::default(),
            )
            .unwrap();
            assert_eq!(count_rows(&db, "relationships", person.id), 1);
        }
    }

    describe "delete_person" {
        it "cascades to relationships, events, media and notes" {
            let db = setup_db();
            let father = create_test_person(&db, "John", "Smith", Gender::Male);
            let child = db
                .create_person(
                    &PersonInput::new("Tom", "Smith", Gender::Male),
                    ParentLinks { father: Some(father.id), mother: None },
                    None,
                )
                .unwrap();
            let event = db.create_event(child.id, &CreateEventInput::new(EventType::Birth)).unwrap();
            db.create_media(child.id, &CreateMediaInput {
                event_id: Some(event.id),
                file_path: "uploads/tom.jpg".into(),
                file_type: "image".into(),
                title: None,
                description: None,
            }).unwrap();
            db.create_note(child.id, &CreateNoteInput { content: "Born at home".into() }, None).unwrap();

            assert!(db.delete_person(child.id).unwrap());

            assert!(db.get_person(child.id).unwrap().is_none());
            for table in ["relationships", "events", "media", "notes"] {
                assert_eq!(count_rows(&db, table, child.id), 0, "{} not cleared", table);
            }
            assert!(db.get_person(father.id).unwrap().is_some());
        }

        it "treats an unknown id as a no-op" {
            let db = setup_db();
            assert!(!db.delete_person(Uuid::new_v4()).unwrap());
        }
    }

    describe "search_people" {
        it "matches first, middle and last names case-insensitively" {
            let db = setup_db();
            let mut input = PersonInput::new("Ada", "Lovelace", Gender::Female);
            input.middle_name = Some("Augusta".into());
            db.create_person(&input, ParentLinks::default(), None).unwrap();
            create_test_person(&db, "Charles", "Babbage", Gender::Male);

            assert_eq!(db.search_people("ADA").unwrap().len(), 1);
            assert_eq!(db.search_people("gust").unwrap().len(), 1);
            assert_eq!(db.search_people("bab").unwrap().len(), 1);
            assert_eq!(db.search_people("a").unwrap().len(), 2);
            assert!(db.search_people("zzz").unwrap().is_empty());
        }

        it "returns everyone for an empty query" {
            let db = setup_db();
            create_test_person(&db, "Ada", "Lovelace", Gender::Female);
            create_test_person(&db, "Charles", "Babbage", Gender::Male);

            let all: Vec<Uuid> = db.list_people().unwrap().into_iter().map(|p| p.id).collect();
            let found: Vec<Uuid> = db.search_people("").unwrap().into_iter().map(|p| p.id).collect();
            assert_eq!(found, all);
            assert_eq!(found.len(), 2);
        }

        it "treats wildcards literally" {
            let db = setup_db();
            create_test_person(&db, "Ada", "Lovelace", Gender::Female);
            assert!(db.search_people("%").unwrap().is_empty());
        }
    }

    describe "list_people" {
        it "orders by last name then first name" {
            let db = setup_db();
            create_test_person(&db, "Zed", "Adams", Gender::Male);
            create_test_person(&db, "Amy", "Brown", Gender::Female);
            create_test_person(&db, "Abe", "Adams", Gender::Male);

            let names: Vec<String> = db.list_people().unwrap().iter().map(|p| p.display_name()).collect();
            assert_eq!(names, vec!["Abe Adams", "Zed Adams", "Amy Brown"]);
        }
    }
}
