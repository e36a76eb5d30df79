use roxmltree::Node;

/// Gets the first child element of `parent` that matches the namespace URI
/// and local tag name.
pub fn get_element<'a, 'input>(parent: Node<'a, 'input>, namespace: &str, tag: &str)
    -> Option<Node<'a, 'input>> {
    parent.children().find(|node| node.has_tag_name((namespace, tag)))
}

/// Gets the text in the first child element of `parent` that matches the
/// namespace URI and local tag name.
pub fn get_element_text<'a>(parent: Node<'a, '_>, namespace: &str, tag: &str) -> Option<&'a str> {
    get_element(parent, namespace, tag).and_then(|node| node.text())
}

/// Iterates over all child elements of `parent` that match the namespace URI
/// and local tag name.
pub fn get_elements<'a, 'input: 'a>(parent: Node<'a, 'input>, namespace: &'a str, tag: &'a str)
    -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    parent.children().filter(move |node| node.has_tag_name((namespace, tag)))
}
