use criterion::{black_box, criterion_group, criterion_main, Criterion};

use fieldsense_core::{Document, FieldClassifier, InputType, Node, NodeId};

/// A registration page with the usual clutter around the password fields
fn registration_page() -> (Document, Vec<NodeId>) {
    let mut doc = Document::new();
    let mut heading = Node::new(fieldsense_core::NodeKind::Heading);
    heading.text = "Create your account".to_string();
    doc.append(None, heading);

    let mut form = Node::form();
    form.action = Some("https://example.com/account/create".to_string());
    form.class = "reg-form".to_string();
    let form = doc.append(None, form);

    let mut username = Node::input(InputType::Text);
    username.name = "username".to_string();
    doc.append(Some(form), username);
    let mut email = Node::input(InputType::Email);
    email.name = "email".to_string();
    doc.append(Some(form), email);

    let mut fields = Vec::new();
    let mut password = Node::input(InputType::Password);
    password.name = "new_password".to_string();
    password.placeholder = Some("Choose a password".to_string());
    fields.push(doc.append(Some(form), password));
    let mut confirm = Node::input(InputType::Password);
    confirm.name = "confirm_password".to_string();
    fields.push(doc.append(Some(form), confirm));

    let mut remember = Node::input(InputType::Checkbox);
    remember.name = "remember_me".to_string();
    doc.append(Some(form), remember);
    let mut submit = Node::input(InputType::Submit);
    submit.value = "Sign up".to_string();
    doc.append(Some(form), submit);

    let mut link = Node::new(fieldsense_core::NodeKind::Anchor);
    link.text = "Forgot your password?".to_string();
    link.href = Some("/password/reset".to_string());
    doc.append(None, link);

    (doc, fields)
}

fn bench_classify(c: &mut Criterion) {
    let model = FieldClassifier::default_model();
    let (doc, fields) = registration_page();

    c.bench_function("classify_registration_page", |b| {
        b.iter(|| black_box(model.classify(&doc, &fields)))
    });
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
