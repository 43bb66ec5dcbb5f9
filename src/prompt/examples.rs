/// A question paired with the Cypher that answers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FewShotExample {
    pub question: &'static str,
    pub query: &'static str,
}

/// Restaurant-graph examples, in prompt order. The chain uses a prefix of this list.
pub const EXAMPLES: &[FewShotExample] = &[
    FewShotExample {
        question: "How many dishes are burgers?",
        query: r#"MATCH (d:Dish)-[:TYPE_OF]->(fc:FoodCategory)
WHERE apoc.text.levenshteinDistance(fc.name, "burger") < 2
RETURN COUNT(d) AS numberOfBurgerDishes"#,
    },
    FewShotExample {
        question: "What types of food does Burtons Grill offer?",
        query: r#"MATCH (p:Place)
WHERE apoc.text.levenshteinDistance(p.name, "Burtons Grill") < 2
MATCH (p)-[:SERVES]->(d:Dish)-[:TYPE_OF]->(fc:FoodCategory)
RETURN DISTINCT fc.name AS foodTypesOffered"#,
    },
    FewShotExample {
        question: "What places have outdoor seating?",
        query: r#"CALL db.index.fulltext.queryNodes("placeDescriptionIndex", "outdoor seating") YIELD node, score
RETURN node.name AS placeName, node.description AS placeDescription, score
ORDER BY score DESC"#,
    },
    FewShotExample {
        question: "What dishes have bacon?",
        query: r#"CALL db.index.fulltext.queryNodes("dishDescriptionIndex", "bacon") YIELD node, score
RETURN node.name AS dishName, node.description AS dishDescription, score
ORDER BY score DESC"#,
    },
    FewShotExample {
        question: "List all steaks ordered by price.",
        query: r#"MATCH (p:Place)-[:SERVES]->(d:Dish)-[:TYPE_OF]->(c:FoodCategory)
WHERE apoc.text.levenshteinDistance(c.name, "steak") < 2
RETURN p.name AS placeName, d.name AS steakName, d.price AS steakPrice
ORDER BY d.price DESC"#,
    },
    FewShotExample {
        question: "List all burgers ordered by price.",
        query: r#"MATCH (p:Place)-[:SERVES]->(d:Dish)-[:TYPE_OF]->(c:FoodCategory)
WHERE apoc.text.levenshteinDistance(c.name, "burger") < 2
RETURN p.name AS placeName, d.name AS burgerName, d.price AS burgerPrice
ORDER BY d.price DESC"#,
    },
    FewShotExample {
        question: "List all the places that have burgers?",
        query: r#"MATCH (p:Place)-[:SERVES]->(d:Dish)-[:TYPE_OF]->(fc:FoodCategory)
WHERE apoc.text.levenshteinDistance(fc.name, "burger") < 2
RETURN DISTINCT p.name AS placesWithBurgers"#,
    },
    FewShotExample {
        question: "List all the types of food available.",
        query: r#"MATCH (fc:FoodCategory)
RETURN DISTINCT fc.name AS foodTypes"#,
    },
    FewShotExample {
        question: "Which places have both pizza and burgers?",
        query: r#"MATCH (p:Place)-[:SERVES]->(d1:Dish)-[:TYPE_OF]->(fc1:FoodCategory)
WHERE apoc.text.levenshteinDistance(fc1.name, "burger") < 2
MATCH (p)-[:SERVES]->(d2:Dish)-[:TYPE_OF]->(fc2:FoodCategory)
WHERE apoc.text.levenshteinDistance(fc2.name, "pizza") < 2
RETURN DISTINCT p.name AS placesWithPizzaAndBurgers"#,
    },
];
