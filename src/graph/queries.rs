/// Cypher used for schema introspection and health checks
pub mod templates {
    pub const PING: &str = "RETURN 1 AS ok";

    pub const NODE_LABELS: &str = r#"
        CALL db.labels() YIELD label
        RETURN label
    "#;

    pub const RELATIONSHIP_TYPES: &str = r#"
        CALL db.relationshipTypes() YIELD relationshipType
        RETURN relationshipType
    "#;

    // Neo4j: requires the APOC plugin, which the few-shot queries rely on anyway.
    pub const NEO4J_NODE_PROPERTIES: &str = r#"
        CALL apoc.meta.data()
        YIELD label, other, elementType, type, property
        WHERE NOT type = "RELATIONSHIP" AND elementType = "node"
          AND NOT label IN ["_Bloom_Perspective_", "_Bloom_Scene_"]
        WITH label AS nodeLabels, collect({property: property, type: type}) AS properties
        RETURN {labels: nodeLabels, properties: properties} AS output
    "#;

    pub const NEO4J_REL_PROPERTIES: &str = r#"
        CALL apoc.meta.data()
        YIELD label, other, elementType, type, property
        WHERE NOT type = "RELATIONSHIP" AND elementType = "relationship"
          AND NOT label IN ["_Bloom_HAS_SCENE_"]
        WITH label AS relType, collect({property: property, type: type}) AS properties
        RETURN {type: relType, properties: properties} AS output
    "#;

    pub const NEO4J_RELATIONSHIPS: &str = r#"
        CALL apoc.meta.data()
        YIELD label, other, elementType, type, property
        WHERE type = "RELATIONSHIP" AND elementType = "node"
        UNWIND other AS other_node
        WITH label AS start, property AS type, toString(other_node) AS end
        WHERE NOT start IN ["_Bloom_Perspective_", "_Bloom_Scene_"]
          AND NOT end IN ["_Bloom_Perspective_", "_Bloom_Scene_"]
          AND NOT type IN ["_Bloom_HAS_SCENE_"]
        RETURN {start: start, type: type, end: end} AS output
    "#;

    // FalkorDB has no APOC; sample the data directly.
    pub const FALKOR_NODE_PROPERTIES: &str = r#"
        MATCH (n)
        UNWIND labels(n) AS label
        UNWIND keys(n) AS property
        RETURN DISTINCT label, property, typeOf(n[property]) AS type
    "#;

    pub const FALKOR_REL_PROPERTIES: &str = r#"
        MATCH ()-[r]->()
        UNWIND keys(r) AS property
        RETURN DISTINCT type(r) AS rel_type, property, typeOf(r[property]) AS type
    "#;

    pub const FALKOR_RELATIONSHIPS: &str = r#"
        MATCH (a)-[r]->(b)
        UNWIND labels(a) AS start
        UNWIND labels(b) AS end
        RETURN DISTINCT start, type(r) AS type, end
    "#;
}
