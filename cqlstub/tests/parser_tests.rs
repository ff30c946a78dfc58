// Type signature parsing through the public API

use cqlstub::{parse_type, CqlType, PrimitiveType, MAX_TYPE_DEPTH};

/// Every descriptor up to `depth` levels, built from a few primitives
fn descriptors(depth: usize) -> Vec<CqlType> {
    let leaves = vec![CqlType::INT, CqlType::TEXT, CqlType::UUID, CqlType::BLOB];
    if depth <= 1 {
        return leaves;
    }
    let inner = descriptors(depth - 1);
    let mut all = leaves;
    for ty in &inner {
        all.push(CqlType::list(ty.clone()));
        all.push(CqlType::set(ty.clone()));
        all.push(CqlType::map(CqlType::TEXT, ty.clone()));
        all.push(CqlType::tuple(vec![ty.clone(), CqlType::INET]).unwrap());
    }
    all
}

#[test]
fn test_signature_round_trip() {
    for ty in descriptors(3) {
        let signature = ty.signature();
        let parsed = parse_type(&signature)
            .unwrap_or_else(|e| panic!("failed to reparse {}: {}", signature, e));
        assert_eq!(parsed, ty, "round trip of {}", signature);
        assert_eq!(parsed.to_string(), signature);
    }
}

#[test]
fn test_all_primitives_parse() {
    assert_eq!(PrimitiveType::ALL.len(), 20);
    for primitive in PrimitiveType::ALL {
        let ty: CqlType = primitive.name().parse().unwrap();
        assert_eq!(ty, CqlType::Primitive(primitive));
        assert!(ty.is_primitive());
    }
}

#[test]
fn test_deeply_nested() {
    let ty = parse_type("map<text,map<int,list<set<tuple<int,inet,date>>>>>").unwrap();
    assert_eq!(ty.depth(), 6);
    assert_eq!(
        ty.signature(),
        "map<text,map<int,list<set<tuple<int,inet,date>>>>>"
    );
}

#[test]
fn test_names_are_case_sensitive() {
    assert!(parse_type("INT").is_err());
    assert!(parse_type("List<int>").is_err());
}

#[test]
fn test_malformed_signatures_are_rejected() {
    let malformed = [
        "",
        " ",
        "<",
        ">",
        "list",
        "list<",
        "list<>",
        "list<int",
        "list<int>>",
        "list<int>extra",
        "map<int>",
        "map<int,int,int>",
        "set<int,text>",
        "tuple<>",
        "tuple<int,>",
        "tuple<,int>",
        "int int",
        "frozen<int>",
        "lst<int>",
        "map<text,intt>",
        "list<int>,",
        "12",
        "int<text>",
    ];
    for signature in malformed {
        assert!(
            parse_type(signature).is_err(),
            "'{}' should not parse",
            signature
        );
    }
}

#[test]
fn test_error_points_at_offending_fragment() {
    let err = parse_type("list<set<strng>>").unwrap_err();
    assert_eq!(err.fragment, "strng");
    assert!(err.to_string().contains("strng"));

    let err = parse_type("tuple<int,map<int>>").unwrap_err();
    assert_eq!(err.fragment, "map<int>");
}

#[test]
fn test_unterminated_deep_nesting_is_rejected() {
    let err = parse_type(&"list<".repeat(100_000)).unwrap_err();
    assert_eq!(err.fragment, "list");
}

#[test]
fn test_well_formed_deep_nesting_is_rejected() {
    let signature = format!("{}int{}", "list<".repeat(50_000), ">".repeat(50_000));
    assert!(parse_type(&signature).is_err());

    let map_chain = format!("{}int{}", "map<text,".repeat(MAX_TYPE_DEPTH), ">".repeat(MAX_TYPE_DEPTH));
    assert!(parse_type(&map_chain).is_err());
}

#[test]
fn test_nesting_up_to_the_limit_parses() {
    let levels = MAX_TYPE_DEPTH - 1;
    let signature = format!("{}uuid{}", "set<".repeat(levels), ">".repeat(levels));
    let ty = parse_type(&signature).unwrap();
    assert_eq!(ty.depth(), MAX_TYPE_DEPTH);
    assert_eq!(ty.signature(), signature);
}
