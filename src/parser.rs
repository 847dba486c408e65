use std::mem;
use std::str::FromStr;

use crate::{
    ast::{
        AttributeSpecialValue, EntityContent, EntityFetch, FacetSummary, FilterConstraint,
        HeadConstraint, HierarchyOutputRequire, HierarchyRequire, HierarchySpecification,
        KeywordEnum, OrderConstraint, OrderDirection, PriceContentMode, Query, ReferenceContent,
        RequireConstraint, Siblings, SpannedToken, StatisticsBase, StatisticsType, StopAt, Token,
    },
    coerce::{self, Operand, Slot},
    error::ParseError,
    grammar::{self, Category},
    lexer::Lexer,
    params::{Arguments, Binder},
    value::Value,
};

/// Default limit of nested constraint levels.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Which tokens may fill a value slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Literals and parameters
    #[default]
    Permissive,
    /// Parameters only; every literal value is rejected. Classifier string
    /// literals stay legal.
    ParametersOnly,
}

impl FromStr for ParseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "permissive" => Ok(ParseMode::Permissive),
            "parameters-only" => Ok(ParseMode::ParametersOnly),
            other => Err(format!(
                "unknown parse mode `{}`, expected `permissive` or `parameters-only`",
                other
            )),
        }
    }
}

impl std::fmt::Display for ParseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseMode::Permissive => f.write_str("permissive"),
            ParseMode::ParametersOnly => f.write_str("parameters-only"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub mode: ParseMode,
    /// Deepest constraint nesting accepted before failing with
    /// [`ParseError::RecursionLimitExceeded`].
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            mode: ParseMode::Permissive,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// What follows in an argument list, looking past one separating comma.
#[derive(Debug, PartialEq)]
enum Next {
    End,
    Constraint(String),
    Value,
    Other,
}

/// Argument cursor of the constraint being parsed.
struct Call {
    keyword: &'static str,
    offset: usize,
    first: bool,
}

impl Call {
    fn slot(&self, name: &'static str) -> Slot {
        Slot::new(self.keyword, name)
    }
}

fn literal_value(token: &Token) -> Option<Value> {
    Some(match token {
        Token::String(s) => Value::String(s.clone()),
        Token::Int(n) => Value::Int(*n),
        Token::Float(n) => Value::Float(*n),
        Token::Boolean(b) => Value::Boolean(*b),
        Token::Date(d) => Value::Date(*d),
        Token::Time(t) => Value::Time(*t),
        Token::DateTime(dt) => Value::DateTime(*dt),
        Token::OffsetDateTime(dt) => Value::OffsetDateTime(*dt),
        Token::Uuid(u) => Value::Uuid(*u),
        Token::Enum(name) => Value::Enum(name.clone()),
        _ => return None,
    })
}

/// Recursive-descent parser building the typed AST in a single pass.
///
/// Tokens are pulled lazily from the lexer with at most one token of
/// lookahead past the current one. Parameters are bound as soon as they are
/// reached, and the first error aborts the whole unit.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: SpannedToken,
    peeked: Option<SpannedToken>,
    binder: Binder<'a>,
    options: ParseOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>, arguments: &'a Arguments) -> Result<Self, ParseError> {
        Parser::with_options(lexer, arguments, ParseOptions::default())
    }

    pub fn with_options(
        mut lexer: Lexer<'a>,
        arguments: &'a Arguments,
        options: ParseOptions,
    ) -> Result<Self, ParseError> {
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            peeked: None,
            binder: Binder::new(arguments),
            options,
            depth: 0,
        })
    }

    /// Number of positional placeholders bound so far.
    pub fn positional_parameters(&self) -> usize {
        self.binder.positional_seen()
    }

    fn advance(&mut self) -> Result<SpannedToken, ParseError> {
        let next = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        Ok(mem::replace(&mut self.current, next))
    }

    fn peek(&mut self) -> Result<&Token, ParseError> {
        let next = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        Ok(&self.peeked.insert(next).token)
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current.token) == mem::discriminant(token)
    }

    fn expect(&mut self, expected: Token, context: &str) -> Result<SpannedToken, ParseError> {
        if !self.check(&expected) {
            return Err(self.unexpected(format!("{} {}", expected.describe(), context)));
        }
        self.advance()
    }

    fn expect_end(&mut self) -> Result<(), ParseError> {
        if self.check(&Token::Eof) {
            Ok(())
        } else {
            Err(self.unexpected("end of input"))
        }
    }

    fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        ParseError::syntax(self.current.offset, expected, self.current.token.describe())
    }

    fn nested<T>(&mut self, parse: fn(&mut Self) -> Result<T, ParseError>) -> Result<T, ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(ParseError::RecursionLimitExceeded {
                offset: self.current.offset,
                limit: self.options.max_depth,
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    // ---------------------------------------------------------------------
    // Units
    // ---------------------------------------------------------------------

    /// Parses `query(...)` covering the whole input.
    pub fn parse_query(&mut self) -> Result<Query, ParseError> {
        let query = self.nested(Self::query)?;
        self.expect_end()?;
        Ok(query)
    }

    pub fn parse_head_list(&mut self) -> Result<Vec<HeadConstraint>, ParseError> {
        self.unit_list(Self::parse_head_constraint)
    }

    pub fn parse_filter_list(&mut self) -> Result<Vec<FilterConstraint>, ParseError> {
        self.unit_list(Self::parse_filter_constraint)
    }

    pub fn parse_order_list(&mut self) -> Result<Vec<OrderConstraint>, ParseError> {
        self.unit_list(Self::parse_order_constraint)
    }

    pub fn parse_require_list(&mut self) -> Result<Vec<RequireConstraint>, ParseError> {
        self.unit_list(Self::parse_require_constraint)
    }

    /// Parses a single classifier token covering the whole input.
    pub fn parse_classifier(&mut self) -> Result<String, ParseError> {
        let operand = self.classifier_operand(&Slot::new("classifier", "name"))?;
        let name = coerce::classifier(operand)?;
        self.expect_end()?;
        Ok(name)
    }

    /// Parses a single value (literal, range, list or parameter) covering
    /// the whole input.
    pub fn parse_value(&mut self) -> Result<Value, ParseError> {
        let operand = self.value_operand(&Slot::new("value", "value"))?;
        self.expect_end()?;
        Ok(operand.value)
    }

    fn unit_list<T>(&mut self, parse: fn(&mut Self) -> Result<T, ParseError>) -> Result<Vec<T>, ParseError> {
        let mut items = vec![parse(self)?];
        while self.check(&Token::Comma) {
            self.advance()?;
            items.push(parse(self)?);
        }
        self.expect_end()?;
        Ok(items)
    }

    fn query(&mut self) -> Result<Query, ParseError> {
        match &self.current.token {
            Token::Identifier(name) if name == "query" => {}
            _ => return Err(self.unexpected("`query`")),
        }
        self.advance()?;
        self.expect(Token::LParen, "after `query`")?;

        let mut query = Query::default();
        loop {
            let offset = self.current.offset;
            let keyword = match &self.current.token {
                Token::Identifier(name) => name.clone(),
                _ => String::new(),
            };
            let duplicate = match keyword.as_str() {
                "collection" => query.head.replace(self.parse_head_constraint()?).is_some(),
                "filterBy" => query.filter_by.replace(self.parse_filter_constraint()?).is_some(),
                "orderBy" => query.order_by.replace(self.parse_order_constraint()?).is_some(),
                "require" => query.require.replace(self.parse_require_constraint()?).is_some(),
                _ => {
                    return Err(self.unexpected("`collection`, `filterBy`, `orderBy` or `require`"));
                }
            };
            if duplicate {
                return Err(ParseError::syntax(
                    offset,
                    "at most one root constraint of each kind",
                    format!("second `{}`", keyword),
                ));
            }
            if !self.check(&Token::Comma) {
                break;
            }
            self.advance()?;
        }

        self.expect(Token::RParen, "closing `query`")?;
        Ok(query)
    }

    // ---------------------------------------------------------------------
    // Argument cursor
    // ---------------------------------------------------------------------

    /// Reads `keyword(` of a constraint of `category`.
    fn open(&mut self, category: Category, expected: &str) -> Result<Call, ParseError> {
        let offset = self.current.offset;
        let keyword = match &self.current.token {
            Token::Identifier(name) => match grammar::lookup(name) {
                Some(keyword) if keyword.category == category => keyword,
                Some(keyword) => {
                    return Err(ParseError::syntax(
                        offset,
                        expected,
                        format!("{} constraint `{}`", keyword.category, keyword.name),
                    ));
                }
                None => {
                    return Err(ParseError::syntax(
                        offset,
                        expected,
                        format!("unknown constraint `{}`", name),
                    ));
                }
            },
            _ => return Err(self.unexpected(expected)),
        };
        self.advance()?;
        self.expect(Token::LParen, &format!("after `{}`", keyword.name))?;
        Ok(Call {
            keyword: keyword.name,
            offset,
            first: true,
        })
    }

    /// A known keyword used where it is not allowed.
    fn misplaced(&self, call: &Call, expected: &str) -> ParseError {
        ParseError::syntax(call.offset, expected, format!("`{}` in this position", call.keyword))
    }

    fn close(&mut self, call: &Call) -> Result<(), ParseError> {
        if !self.check(&Token::RParen) {
            return Err(self.unexpected(format!(
                "`)` after the last argument of `{}`",
                call.keyword
            )));
        }
        self.advance()?;
        Ok(())
    }

    fn next(&mut self, call: &Call) -> Result<Next, ParseError> {
        let token = if call.first {
            &self.current.token
        } else {
            match self.current.token {
                Token::Comma => self.peek()?,
                Token::RParen => return Ok(Next::End),
                _ => return Ok(Next::Other),
            }
        };
        Ok(match token {
            Token::RParen if call.first => Next::End,
            Token::Identifier(name) => Next::Constraint(name.clone()),
            Token::Null => Next::Value,
            token if token.starts_value() => Next::Value,
            _ => Next::Other,
        })
    }

    fn next_is(&mut self, call: &Call, keywords: &[&str]) -> Result<bool, ParseError> {
        Ok(match self.next(call)? {
            Next::Constraint(name) => keywords.contains(&name.as_str()),
            _ => false,
        })
    }

    fn separator(&mut self, call: &mut Call) -> Result<(), ParseError> {
        if call.first {
            call.first = false;
        } else {
            self.expect(Token::Comma, &format!("between arguments of `{}`", call.keyword))?;
        }
        Ok(())
    }

    fn missing(&self, call: &Call, name: &'static str) -> ParseError {
        self.unexpected(call.slot(name).describe())
    }

    /// Fails unless another argument follows.
    fn require_more(&mut self, call: &mut Call, name: &'static str) -> Result<(), ParseError> {
        if self.next(call)? == Next::End {
            return Err(self.missing(call, name));
        }
        self.separator(call)
    }

    fn arg_classifier(&mut self, call: &mut Call, name: &'static str) -> Result<String, ParseError> {
        self.require_more(call, name)?;
        let operand = self.classifier_operand(&call.slot(name))?;
        coerce::classifier(operand)
    }

    fn arg_classifiers(
        &mut self,
        call: &mut Call,
        name: &'static str,
        min: usize,
    ) -> Result<Vec<String>, ParseError> {
        let mut operands = Vec::new();
        while self.next(call)? == Next::Value {
            self.separator(call)?;
            operands.push(self.classifier_operand(&call.slot(name))?);
        }
        if operands.len() < min {
            return Err(self.missing(call, name));
        }
        coerce::flatten(operands)
            .into_iter()
            .map(coerce::classifier)
            .collect()
    }

    fn arg_value(&mut self, call: &mut Call, name: &'static str) -> Result<Operand, ParseError> {
        self.require_more(call, name)?;
        self.value_operand(&call.slot(name))
    }

    fn opt_value(&mut self, call: &mut Call, name: &'static str) -> Result<Option<Operand>, ParseError> {
        if self.next(call)? == Next::Value {
            self.separator(call)?;
            Ok(Some(self.value_operand(&call.slot(name))?))
        } else {
            Ok(None)
        }
    }

    fn arg_values(
        &mut self,
        call: &mut Call,
        name: &'static str,
        min: usize,
    ) -> Result<Vec<Operand>, ParseError> {
        let mut operands = Vec::new();
        while self.next(call)? == Next::Value {
            self.separator(call)?;
            operands.push(self.value_operand(&call.slot(name))?);
        }
        if operands.len() < min {
            return Err(self.missing(call, name));
        }
        Ok(operands)
    }

    /// Range bound: a value or `null` for an open bound. Returns the bound
    /// and the offset it starts at.
    fn arg_bound(
        &mut self,
        call: &mut Call,
        name: &'static str,
    ) -> Result<(Option<Operand>, usize), ParseError> {
        self.require_more(call, name)?;
        let offset = self.current.offset;
        if self.check(&Token::Null) {
            self.advance()?;
            return Ok((None, offset));
        }
        Ok((Some(self.value_operand(&call.slot(name))?), offset))
    }

    /// One required nested constraint.
    fn arg_nested<T>(
        &mut self,
        call: &mut Call,
        name: &'static str,
        parse: fn(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.require_more(call, name)?;
        parse(self)
    }

    /// Optional nested constraint, taken only when its keyword is next.
    fn opt_nested<T>(
        &mut self,
        call: &mut Call,
        keywords: &[&str],
        parse: fn(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Option<T>, ParseError> {
        if self.next_is(call, keywords)? {
            self.separator(call)?;
            Ok(Some(parse(self)?))
        } else {
            Ok(None)
        }
    }

    /// Nested constraints up to the closing parenthesis.
    fn children<T>(
        &mut self,
        call: &mut Call,
        name: &'static str,
        min: usize,
        parse: fn(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut children = Vec::new();
        loop {
            match self.next(call)? {
                Next::Constraint(_) => {
                    self.separator(call)?;
                    children.push(parse(self)?);
                }
                Next::End => break,
                Next::Value | Next::Other => {
                    self.separator(call)?;
                    return Err(self.unexpected(format!(
                        "constraint as argument `{}` of `{}`",
                        name, call.keyword
                    )));
                }
            }
        }
        if children.len() < min {
            return Err(self.missing(call, name));
        }
        Ok(children)
    }

    // ---------------------------------------------------------------------
    // Tokens to operands
    // ---------------------------------------------------------------------

    fn literals_allowed(&self) -> Result<(), ParseError> {
        match self.options.mode {
            ParseMode::Permissive => Ok(()),
            ParseMode::ParametersOnly => {
                Err(self.unexpected("parameter (literal values are disabled)"))
            }
        }
    }

    fn parameter_operand(&mut self, slot: &Slot) -> Result<Option<Operand>, ParseError> {
        let offset = self.current.offset;
        match &self.current.token {
            Token::PositionalParameter => {
                self.advance()?;
                Ok(Some(self.binder.bind_positional(offset, slot)?))
            }
            Token::NamedParameter(name) => {
                let name = name.clone();
                self.advance()?;
                Ok(Some(self.binder.bind_named(&name, offset, slot)?))
            }
            _ => Ok(None),
        }
    }

    fn classifier_operand(&mut self, slot: &Slot) -> Result<Operand, ParseError> {
        if let Some(operand) = self.parameter_operand(slot)? {
            return Ok(operand);
        }
        let offset = self.current.offset;
        match &self.current.token {
            Token::String(name) => {
                let value = Value::String(name.clone());
                self.advance()?;
                Ok(Operand::literal(value, offset))
            }
            _ => Err(self.unexpected(format!(
                "classifier string or parameter for {}",
                slot.describe()
            ))),
        }
    }

    /// Scalar literal or parameter.
    fn scalar_operand(&mut self, slot: &Slot) -> Result<Operand, ParseError> {
        if let Some(operand) = self.parameter_operand(slot)? {
            return Ok(operand);
        }
        let offset = self.current.offset;
        match literal_value(&self.current.token) {
            Some(value) => {
                self.literals_allowed()?;
                self.advance()?;
                Ok(Operand::literal(value, offset))
            }
            None => Err(self.unexpected(format!("value for {}", slot.describe()))),
        }
    }

    fn bound_operand(&mut self, slot: &Slot) -> Result<Option<Operand>, ParseError> {
        if self.check(&Token::Null) {
            self.advance()?;
            Ok(None)
        } else {
            self.scalar_operand(slot).map(Some)
        }
    }

    fn value_operand(&mut self, slot: &Slot) -> Result<Operand, ParseError> {
        match self.current.token {
            Token::LBracket => self.range_literal(slot),
            Token::LBrace => self.multiple_literal(slot),
            _ => self.scalar_operand(slot),
        }
    }

    /// `[lo,hi]` with either bound left empty or `null`.
    fn range_literal(&mut self, slot: &Slot) -> Result<Operand, ParseError> {
        self.literals_allowed()?;
        let offset = self.advance()?.offset;

        if self.check(&Token::RBracket) {
            return Err(self.unexpected("range bound"));
        }
        let from = if self.check(&Token::Comma) {
            None
        } else {
            self.bound_operand(slot)?
        };
        self.expect(Token::Comma, "between range bounds")?;
        let to = if self.check(&Token::RBracket) {
            None
        } else {
            self.bound_operand(slot)?
        };
        self.expect(Token::RBracket, "closing range")?;

        let value = coerce::range(from, to, offset, slot)?;
        Ok(Operand::literal(value, offset))
    }

    /// `{v1, v2, ...}`
    fn multiple_literal(&mut self, slot: &Slot) -> Result<Operand, ParseError> {
        self.literals_allowed()?;
        let offset = self.advance()?.offset;

        let mut values = vec![self.scalar_operand(slot)?.value];
        while self.check(&Token::Comma) {
            self.advance()?;
            values.push(self.scalar_operand(slot)?.value);
        }
        self.expect(Token::RBrace, "closing list of values")?;

        Ok(Operand::literal(Value::Multiple(values), offset))
    }

    // ---------------------------------------------------------------------
    // Head
    // ---------------------------------------------------------------------

    fn parse_head_constraint(&mut self) -> Result<HeadConstraint, ParseError> {
        self.nested(Self::head_constraint)
    }

    fn head_constraint(&mut self) -> Result<HeadConstraint, ParseError> {
        let mut call = self.open(Category::Head, "head constraint")?;
        let constraint = match call.keyword {
            "collection" => HeadConstraint::Collection(self.arg_classifier(&mut call, "entityType")?),
            _ => return Err(self.misplaced(&call, "head constraint")),
        };
        self.close(&call)?;
        Ok(constraint)
    }

    // ---------------------------------------------------------------------
    // Filter
    // ---------------------------------------------------------------------

    fn parse_filter_constraint(&mut self) -> Result<FilterConstraint, ParseError> {
        self.nested(Self::filter_constraint)
    }

    fn parse_filter_child(&mut self) -> Result<Box<FilterConstraint>, ParseError> {
        self.parse_filter_constraint().map(Box::new)
    }

    // The `*_constraint` dispatchers are on the recursive path and must keep
    // small frames; keywords that cannot nest go to out-of-line `*_leaf`
    // helpers.

    fn filter_constraint(&mut self) -> Result<FilterConstraint, ParseError> {
        let mut call = self.open(Category::Filter, "filter constraint")?;
        let constraint = match call.keyword {
            "filterBy" | "filterGroupBy" | "and" | "or" | "userFilter" | "not" | "entityHaving" => {
                self.filter_container(&mut call)?
            }
            "facetHaving"
            | "referenceHaving"
            | "hierarchyWithin"
            | "hierarchyWithinSelf"
            | "hierarchyWithinRoot"
            | "hierarchyWithinRootSelf" => self.filter_reference(&mut call)?,
            _ => self.filter_leaf(&mut call)?,
        };
        self.close(&call)?;
        Ok(constraint)
    }

    fn filter_container(&mut self, c: &mut Call) -> Result<FilterConstraint, ParseError> {
        Ok(match c.keyword {
            "filterBy" => FilterConstraint::FilterBy(self.filter_children(c, 1)?),
            "filterGroupBy" => FilterConstraint::FilterGroupBy(self.filter_children(c, 1)?),
            "and" => FilterConstraint::And(self.filter_children(c, 0)?),
            "or" => FilterConstraint::Or(self.filter_children(c, 0)?),
            "userFilter" => FilterConstraint::UserFilter(self.filter_children(c, 0)?),
            "not" => FilterConstraint::Not(self.arg_nested(c, "filter", Self::parse_filter_child)?),
            _ => FilterConstraint::EntityHaving(self.arg_nested(c, "filter", Self::parse_filter_child)?),
        })
    }

    fn filter_reference(&mut self, c: &mut Call) -> Result<FilterConstraint, ParseError> {
        Ok(match c.keyword {
            "facetHaving" => FilterConstraint::FacetHaving {
                reference: self.arg_classifier(c, "referenceName")?,
                children: self.filter_children(c, 1)?,
            },
            "referenceHaving" => {
                let reference = self.arg_classifier(c, "referenceName")?;
                let filter = match self.next(c)? {
                    Next::End => None,
                    _ => Some(self.arg_nested(c, "filter", Self::parse_filter_child)?),
                };
                FilterConstraint::ReferenceHaving { reference, filter }
            }
            "hierarchyWithin" | "hierarchyWithinSelf" => {
                let reference = match c.keyword {
                    "hierarchyWithin" => Some(self.arg_classifier(c, "referenceName")?),
                    _ => None,
                };
                let parent = self.arg_nested(c, "ofParent", Self::parse_filter_child)?;
                FilterConstraint::HierarchyWithin {
                    reference,
                    parent,
                    specifications: self.children(c, "with", 0, Self::parse_hierarchy_specification)?,
                }
            }
            _ => {
                let reference = match c.keyword {
                    "hierarchyWithinRoot" => Some(self.arg_classifier(c, "referenceName")?),
                    _ => None,
                };
                FilterConstraint::HierarchyWithinRoot {
                    reference,
                    specifications: self.children(c, "with", 0, Self::parse_hierarchy_specification)?,
                }
            }
        })
    }

    #[inline(never)]
    fn filter_leaf(&mut self, c: &mut Call) -> Result<FilterConstraint, ParseError> {
        Ok(match c.keyword {
            "attributeEquals"
            | "attributeGreaterThan"
            | "attributeGreaterThanEquals"
            | "attributeLessThan"
            | "attributeLessThanEquals" => self.attribute_comparison(c)?,
            "attributeBetween" => {
                let attribute = self.arg_classifier(c, "attribute")?;
                let from = coerce::comparable(self.arg_value(c, "from")?, &c.slot("from"))?;
                let to = coerce::comparable(self.arg_value(c, "to")?, &c.slot("to"))?;
                FilterConstraint::AttributeBetween {
                    attribute,
                    from,
                    to,
                }
            }
            "attributeInSet" => {
                let attribute = self.arg_classifier(c, "attribute")?;
                let operands = self.arg_values(c, "values", 1)?;
                FilterConstraint::AttributeInSet {
                    attribute,
                    values: coerce::list(operands, &c.slot("values"), coerce::comparable)?,
                }
            }
            "attributeContains" | "attributeStartsWith" | "attributeEndsWith" => {
                self.attribute_text(c)?
            }
            "attributeEqualsTrue" | "attributeEqualsFalse" => FilterConstraint::AttributeEquals {
                attribute: self.arg_classifier(c, "attribute")?,
                value: Value::Boolean(c.keyword == "attributeEqualsTrue"),
            },
            "attributeIs" => {
                let attribute = self.arg_classifier(c, "attribute")?;
                let special = self.arg_value(c, "special")?;
                FilterConstraint::AttributeIs {
                    attribute,
                    special: coerce::enumeration(special, &c.slot("special"))?,
                }
            }
            "attributeIsNull" | "attributeIsNotNull" => FilterConstraint::AttributeIs {
                attribute: self.arg_classifier(c, "attribute")?,
                special: if c.keyword == "attributeIsNull" {
                    AttributeSpecialValue::Null
                } else {
                    AttributeSpecialValue::NotNull
                },
            },
            "attributeInRange" => self.attribute_in_range(c)?,
            "attributeInRangeNow" => FilterConstraint::AttributeInRangeNow {
                attribute: self.arg_classifier(c, "attribute")?,
            },
            "entityPrimaryKeyInSet" => {
                let operands = self.arg_values(c, "primaryKeys", 0)?;
                FilterConstraint::EntityPrimaryKeyInSet(coerce::list(
                    operands,
                    &c.slot("primaryKeys"),
                    coerce::int,
                )?)
            }
            "entityLocaleEquals" => {
                let locale = self.arg_value(c, "locale")?;
                FilterConstraint::EntityLocaleEquals(coerce::locale(locale, &c.slot("locale"))?)
            }
            "priceInCurrency" => {
                let currency = self.arg_value(c, "currency")?;
                FilterConstraint::PriceInCurrency(coerce::currency(currency, &c.slot("currency"))?)
            }
            "priceInPriceLists" => {
                FilterConstraint::PriceInPriceLists(self.arg_classifiers(c, "priceLists", 0)?)
            }
            "priceValidIn" => {
                let moment = self.arg_value(c, "moment")?;
                FilterConstraint::PriceValidIn(coerce::offset_date_time(moment, &c.slot("moment"))?)
            }
            "priceValidInNow" => FilterConstraint::PriceValidInNow,
            "priceBetween" => {
                let from = coerce::number(self.arg_value(c, "from")?, &c.slot("from"))?;
                let to = coerce::number(self.arg_value(c, "to")?, &c.slot("to"))?;
                FilterConstraint::PriceBetween { from, to }
            }
            _ => return Err(self.misplaced(c, "filter constraint")),
        })
    }

    fn filter_children(&mut self, call: &mut Call, min: usize) -> Result<Vec<FilterConstraint>, ParseError> {
        self.children(call, "children", min, Self::parse_filter_constraint)
    }

    fn attribute_comparison(&mut self, call: &mut Call) -> Result<FilterConstraint, ParseError> {
        let attribute = self.arg_classifier(call, "attribute")?;
        let value = coerce::comparable(self.arg_value(call, "value")?, &call.slot("value"))?;
        Ok(match call.keyword {
            "attributeGreaterThan" => FilterConstraint::AttributeGreaterThan { attribute, value },
            "attributeGreaterThanEquals" => {
                FilterConstraint::AttributeGreaterThanEquals { attribute, value }
            }
            "attributeLessThan" => FilterConstraint::AttributeLessThan { attribute, value },
            "attributeLessThanEquals" => FilterConstraint::AttributeLessThanEquals { attribute, value },
            _ => FilterConstraint::AttributeEquals { attribute, value },
        })
    }

    fn attribute_text(&mut self, call: &mut Call) -> Result<FilterConstraint, ParseError> {
        let attribute = self.arg_classifier(call, "attribute")?;
        let text = coerce::string(self.arg_value(call, "text")?, &call.slot("text"))?;
        Ok(match call.keyword {
            "attributeStartsWith" => FilterConstraint::AttributeStartsWith { attribute, text },
            "attributeEndsWith" => FilterConstraint::AttributeEndsWith { attribute, text },
            _ => FilterConstraint::AttributeContains { attribute, text },
        })
    }

    /// `attributeInRange(c, v)` or `attributeInRange(c, lo, hi)`.
    fn attribute_in_range(&mut self, call: &mut Call) -> Result<FilterConstraint, ParseError> {
        let attribute = self.arg_classifier(call, "attribute")?;
        let (from, offset) = self.arg_bound(call, "value")?;

        let value = if self.next(call)? == Next::Value {
            let (to, _) = self.arg_bound(call, "to")?;
            coerce::range(from, to, offset, &call.slot("value"))?
        } else {
            match from {
                Some(operand) => coerce::in_range(operand, &call.slot("value"))?,
                None => {
                    return Err(ParseError::syntax(
                        offset,
                        format!("value for {}", call.slot("value").describe()),
                        Token::Null.describe(),
                    ));
                }
            }
        };

        Ok(FilterConstraint::AttributeInRange { attribute, value })
    }

    fn parse_hierarchy_specification(&mut self) -> Result<HierarchySpecification, ParseError> {
        self.nested(Self::hierarchy_specification)
    }

    fn hierarchy_specification(&mut self) -> Result<HierarchySpecification, ParseError> {
        const EXPECTED: &str = "`directRelation`, `excludingRoot`, `having` or `excluding`";
        let mut call = self.open(Category::Filter, EXPECTED)?;
        let specification = match call.keyword {
            "directRelation" => HierarchySpecification::DirectRelation,
            "excludingRoot" => HierarchySpecification::ExcludingRoot,
            "having" => HierarchySpecification::Having(self.filter_children(&mut call, 1)?),
            "excluding" => HierarchySpecification::Excluding(self.filter_children(&mut call, 1)?),
            _ => return Err(self.misplaced(&call, EXPECTED)),
        };
        self.close(&call)?;
        Ok(specification)
    }

    // ---------------------------------------------------------------------
    // Order
    // ---------------------------------------------------------------------

    fn parse_order_constraint(&mut self) -> Result<OrderConstraint, ParseError> {
        self.nested(Self::order_constraint)
    }

    fn order_constraint(&mut self) -> Result<OrderConstraint, ParseError> {
        let mut call = self.open(Category::Order, "order constraint")?;
        let c = &mut call;
        let constraint = match c.keyword {
            "orderBy" => OrderConstraint::OrderBy(self.order_children(c, 0)?),
            "orderGroupBy" => OrderConstraint::OrderGroupBy(self.order_children(c, 0)?),
            "entityProperty" => OrderConstraint::EntityProperty(self.order_children(c, 1)?),
            "referenceProperty" => OrderConstraint::ReferenceProperty {
                reference: self.arg_classifier(c, "referenceName")?,
                children: self.order_children(c, 1)?,
            },
            _ => self.order_leaf(c)?,
        };
        self.close(&call)?;
        Ok(constraint)
    }

    #[inline(never)]
    fn order_leaf(&mut self, c: &mut Call) -> Result<OrderConstraint, ParseError> {
        Ok(match c.keyword {
            "attributeNatural" => OrderConstraint::AttributeNatural {
                attribute: self.arg_classifier(c, "attribute")?,
                direction: self.opt_direction(c)?,
            },
            "attributeSetExact" => {
                let attribute = self.arg_classifier(c, "attribute")?;
                let operands = self.arg_values(c, "values", 1)?;
                OrderConstraint::AttributeSetExact {
                    attribute,
                    values: coerce::list(operands, &c.slot("values"), coerce::comparable)?,
                }
            }
            "attributeSetInFilter" => OrderConstraint::AttributeSetInFilter {
                attribute: self.arg_classifier(c, "attribute")?,
            },
            "entityPrimaryKeyExact" => {
                let operands = self.arg_values(c, "primaryKeys", 1)?;
                OrderConstraint::EntityPrimaryKeyExact(coerce::list(
                    operands,
                    &c.slot("primaryKeys"),
                    coerce::int,
                )?)
            }
            "entityPrimaryKeyInFilter" => OrderConstraint::EntityPrimaryKeyInFilter,
            "priceNatural" => OrderConstraint::PriceNatural(self.opt_direction(c)?),
            "random" => OrderConstraint::Random,
            _ => return Err(self.misplaced(c, "order constraint")),
        })
    }

    fn order_children(&mut self, call: &mut Call, min: usize) -> Result<Vec<OrderConstraint>, ParseError> {
        self.children(call, "children", min, Self::parse_order_constraint)
    }

    fn opt_direction(&mut self, call: &mut Call) -> Result<OrderDirection, ParseError> {
        self.opt_enum(call, "direction")
    }

    fn opt_enum<E: KeywordEnum + Default>(
        &mut self,
        call: &mut Call,
        name: &'static str,
    ) -> Result<E, ParseError> {
        match self.opt_value(call, name)? {
            Some(operand) => coerce::enumeration(operand, &call.slot(name)),
            None => Ok(E::default()),
        }
    }

    // ---------------------------------------------------------------------
    // Require
    // ---------------------------------------------------------------------

    fn parse_require_constraint(&mut self) -> Result<RequireConstraint, ParseError> {
        self.nested(Self::require_constraint)
    }

    fn require_constraint(&mut self) -> Result<RequireConstraint, ParseError> {
        let mut call = self.open(Category::Require, "require constraint")?;
        let c = &mut call;
        let constraint = match c.keyword {
            "require" => RequireConstraint::Require(self.children(
                c,
                "children",
                0,
                Self::parse_require_constraint,
            )?),
            "entityFetch" => RequireConstraint::EntityFetch(self.fetch_body(c)?),
            "entityGroupFetch" => RequireConstraint::EntityGroupFetch(self.fetch_body(c)?),
            "facetSummary"
            | "facetSummaryOfReference"
            | "facetGroupsConjunction"
            | "facetGroupsDisjunction"
            | "facetGroupsNegation" => self.facet_requirement(c)?,
            "hierarchyOfSelf" | "hierarchyOfReference" => self.hierarchy_of(c)?,
            _ => self.require_leaf(c)?,
        };
        self.close(&call)?;
        Ok(constraint)
    }

    fn facet_requirement(&mut self, c: &mut Call) -> Result<RequireConstraint, ParseError> {
        Ok(match c.keyword {
            "facetSummary" => RequireConstraint::FacetSummary(self.facet_summary(c)?),
            "facetSummaryOfReference" => RequireConstraint::FacetSummaryOfReference {
                reference: self.arg_classifier(c, "referenceName")?,
                summary: self.facet_summary(c)?,
            },
            _ => {
                let reference = self.arg_classifier(c, "referenceName")?;
                let filter_by = self
                    .opt_nested(c, &["filterBy"], Self::parse_filter_constraint)?
                    .map(Box::new);
                match c.keyword {
                    "facetGroupsConjunction" => {
                        RequireConstraint::FacetGroupsConjunction { reference, filter_by }
                    }
                    "facetGroupsDisjunction" => {
                        RequireConstraint::FacetGroupsDisjunction { reference, filter_by }
                    }
                    _ => RequireConstraint::FacetGroupsNegation { reference, filter_by },
                }
            }
        })
    }

    fn hierarchy_of(&mut self, c: &mut Call) -> Result<RequireConstraint, ParseError> {
        if c.keyword == "hierarchyOfSelf" {
            let order_by = self.opt_order_by(c)?;
            return Ok(RequireConstraint::HierarchyOfSelf {
                order_by,
                requirements: self.hierarchy_requirements(c)?,
            });
        }
        let reference = self.arg_classifier(c, "referenceName")?;
        let behaviour = self.opt_enum(c, "emptyHierarchicalEntityBehaviour")?;
        let order_by = self.opt_order_by(c)?;
        Ok(RequireConstraint::HierarchyOfReference {
            reference,
            behaviour,
            order_by,
            requirements: self.hierarchy_requirements(c)?,
        })
    }

    #[inline(never)]
    fn require_leaf(&mut self, c: &mut Call) -> Result<RequireConstraint, ParseError> {
        Ok(match c.keyword {
            "page" => RequireConstraint::Page {
                number: self.arg_int(c, "pageNumber")?,
                size: self.arg_int(c, "pageSize")?,
            },
            "strip" => RequireConstraint::Strip {
                offset: self.arg_int(c, "offset")?,
                limit: self.arg_int(c, "limit")?,
            },
            "priceType" => {
                let mode = self.arg_value(c, "priceMode")?;
                RequireConstraint::PriceType(coerce::enumeration(mode, &c.slot("priceMode"))?)
            }
            "attributeHistogram" => RequireConstraint::AttributeHistogram {
                buckets: self.arg_int(c, "requestedBucketCount")?,
                attributes: self.arg_classifiers(c, "attributeNames", 1)?,
            },
            "priceHistogram" => RequireConstraint::PriceHistogram {
                buckets: self.arg_int(c, "requestedBucketCount")?,
            },
            "queryTelemetry" => RequireConstraint::QueryTelemetry,
            _ => match self.entity_content(c)? {
                Some(content) => RequireConstraint::Content(content),
                None => return Err(self.misplaced(c, "require constraint")),
            },
        })
    }

    fn arg_int(&mut self, call: &mut Call, name: &'static str) -> Result<i64, ParseError> {
        let operand = self.arg_value(call, name)?;
        coerce::int(operand, &call.slot(name))
    }

    fn opt_order_by(&mut self, call: &mut Call) -> Result<Option<Box<OrderConstraint>>, ParseError> {
        Ok(self
            .opt_nested(call, &["orderBy"], Self::parse_order_constraint)?
            .map(Box::new))
    }

    /// `entityFetch(...)` or `entityGroupFetch(...)` as a nested argument.
    fn parse_fetch(&mut self) -> Result<EntityFetch, ParseError> {
        self.nested(Self::fetch)
    }

    fn fetch(&mut self) -> Result<EntityFetch, ParseError> {
        let mut call = self.open(Category::Require, "`entityFetch` or `entityGroupFetch`")?;
        let fetch = match call.keyword {
            "entityFetch" | "entityGroupFetch" => self.fetch_body(&mut call)?,
            _ => return Err(self.misplaced(&call, "`entityFetch` or `entityGroupFetch`")),
        };
        self.close(&call)?;
        Ok(fetch)
    }

    fn fetch_body(&mut self, call: &mut Call) -> Result<EntityFetch, ParseError> {
        let requirements = self.children(call, "requirements", 0, Self::parse_entity_content)?;
        Ok(EntityFetch::new(requirements))
    }

    fn opt_fetch(&mut self, call: &mut Call, keyword: &str) -> Result<Option<EntityFetch>, ParseError> {
        self.opt_nested(call, &[keyword], Self::parse_fetch)
    }

    fn parse_entity_content(&mut self) -> Result<EntityContent, ParseError> {
        self.nested(Self::entity_content_constraint)
    }

    fn entity_content_constraint(&mut self) -> Result<EntityContent, ParseError> {
        const EXPECTED: &str = "entity content requirement";
        let mut call = self.open(Category::Require, EXPECTED)?;
        let content = match self.entity_content(&mut call)? {
            Some(content) => content,
            None => return Err(self.misplaced(&call, EXPECTED)),
        };
        self.close(&call)?;
        Ok(content)
    }

    /// Arguments of an entity content keyword; `None` for other keywords.
    fn entity_content(&mut self, c: &mut Call) -> Result<Option<EntityContent>, ParseError> {
        Ok(Some(match c.keyword {
            "hierarchyContent" => EntityContent::HierarchyContent {
                stop_at: self.opt_nested(c, &["stopAt"], Self::parse_stop_at)?,
                entity_fetch: self.opt_fetch(c, "entityFetch")?,
            },
            "referenceContent"
            | "referenceContentAll"
            | "referenceContentWithAttributes"
            | "referenceContentAllWithAttributes" => {
                EntityContent::ReferenceContent(self.reference_content(c)?)
            }
            _ => return self.entity_content_leaf(c),
        }))
    }

    #[inline(never)]
    fn entity_content_leaf(&mut self, c: &mut Call) -> Result<Option<EntityContent>, ParseError> {
        Ok(Some(match c.keyword {
            "attributeContent" => EntityContent::AttributeContent(self.arg_classifiers(c, "attributeNames", 0)?),
            "attributeContentAll" => EntityContent::AttributeContent(Vec::new()),
            "associatedDataContent" => {
                EntityContent::AssociatedDataContent(self.arg_classifiers(c, "associatedDataNames", 0)?)
            }
            "associatedDataContentAll" => EntityContent::AssociatedDataContent(Vec::new()),
            "priceContent" => {
                let mode = self.arg_value(c, "contentMode")?;
                let mode = coerce::enumeration(mode, &c.slot("contentMode"))?;
                EntityContent::PriceContent {
                    mode,
                    price_lists: self.price_lists(c)?,
                }
            }
            "priceContentAll" => EntityContent::PriceContent {
                mode: PriceContentMode::All,
                price_lists: Vec::new(),
            },
            "priceContentRespectingFilter" => EntityContent::PriceContent {
                mode: PriceContentMode::RespectingFilter,
                price_lists: self.price_lists(c)?,
            },
            "dataInLocales" => {
                let operands = self.arg_values(c, "locales", 0)?;
                EntityContent::DataInLocales(coerce::list(operands, &c.slot("locales"), coerce::locale)?)
            }
            "dataInLocalesAll" => EntityContent::DataInLocales(Vec::new()),
            _ => return Ok(None),
        }))
    }

    fn price_lists(&mut self, call: &mut Call) -> Result<Vec<String>, ParseError> {
        let operands = self.arg_values(call, "priceLists", 0)?;
        coerce::list(operands, &call.slot("priceLists"), coerce::string)
    }

    fn reference_content(&mut self, call: &mut Call) -> Result<ReferenceContent, ParseError> {
        let all = call.keyword.starts_with("referenceContentAll");
        let with_attributes = call.keyword.ends_with("WithAttributes");

        let references = match (all, with_attributes) {
            (true, _) => Vec::new(),
            (false, true) => vec![self.arg_classifier(call, "referenceName")?],
            (false, false) => self.arg_classifiers(call, "referenceNames", 0)?,
        };

        let (filter_by, order_by) = if all {
            (None, None)
        } else {
            let filter_by = self
                .opt_nested(call, &["filterBy"], Self::parse_filter_constraint)?
                .map(Box::new);
            (filter_by, self.opt_order_by(call)?)
        };
        if (filter_by.is_some() || order_by.is_some()) && references.len() != 1 {
            return Err(ParseError::syntax(
                call.offset,
                format!(
                    "exactly one reference name in `{}` with `filterBy` or `orderBy`",
                    call.keyword
                ),
                format!("{} reference names", references.len()),
            ));
        }

        let attribute_content = if with_attributes {
            let content = self.opt_nested(
                call,
                &["attributeContent", "attributeContentAll"],
                Self::parse_entity_content,
            )?;
            Some(match content {
                Some(EntityContent::AttributeContent(names)) => names,
                _ => Vec::new(),
            })
        } else {
            None
        };

        Ok(ReferenceContent {
            references,
            filter_by,
            order_by,
            attribute_content,
            entity_fetch: self.opt_fetch(call, "entityFetch")?,
            entity_group_fetch: self.opt_fetch(call, "entityGroupFetch")?,
        })
    }

    fn facet_summary(&mut self, call: &mut Call) -> Result<FacetSummary, ParseError> {
        let depth = self.opt_enum(call, "statisticsDepth")?;
        let filter_by = self
            .opt_nested(call, &["filterBy"], Self::parse_filter_constraint)?
            .map(Box::new);
        let filter_group_by = self
            .opt_nested(call, &["filterGroupBy"], Self::parse_filter_constraint)?
            .map(Box::new);
        let order_by = self.opt_order_by(call)?;
        let order_group_by = self
            .opt_nested(call, &["orderGroupBy"], Self::parse_order_constraint)?
            .map(Box::new);

        Ok(FacetSummary {
            depth,
            filter_by,
            filter_group_by,
            order_by,
            order_group_by,
            entity_fetch: self.opt_fetch(call, "entityFetch")?,
            entity_group_fetch: self.opt_fetch(call, "entityGroupFetch")?,
        })
    }

    // ---------------------------------------------------------------------
    // Hierarchy requirements
    // ---------------------------------------------------------------------

    fn hierarchy_requirements(&mut self, call: &mut Call) -> Result<Vec<HierarchyRequire>, ParseError> {
        self.children(call, "requirements", 1, Self::parse_hierarchy_require)
    }

    fn parse_hierarchy_require(&mut self) -> Result<HierarchyRequire, ParseError> {
        self.nested(Self::hierarchy_require)
    }

    fn hierarchy_require(&mut self) -> Result<HierarchyRequire, ParseError> {
        const EXPECTED: &str = "`fromRoot`, `fromNode`, `children`, `siblings` or `parents`";
        let mut call = self.open(Category::Require, EXPECTED)?;
        let c = &mut call;
        let requirement = match c.keyword {
            "fromRoot" => HierarchyRequire::FromRoot {
                output_name: self.arg_classifier(c, "outputName")?,
                entity_fetch: self.opt_fetch(c, "entityFetch")?,
                requirements: self.hierarchy_outputs(c)?,
            },
            "fromNode" => {
                let output_name = self.arg_classifier(c, "outputName")?;
                if !self.next_is(c, &["node"])? {
                    return Err(self.missing(c, "node"));
                }
                HierarchyRequire::FromNode {
                    output_name,
                    node: self.arg_nested(c, "node", Self::parse_node)?,
                    entity_fetch: self.opt_fetch(c, "entityFetch")?,
                    requirements: self.hierarchy_outputs(c)?,
                }
            }
            "children" => HierarchyRequire::Children {
                output_name: self.arg_classifier(c, "outputName")?,
                entity_fetch: self.opt_fetch(c, "entityFetch")?,
                requirements: self.hierarchy_outputs(c)?,
            },
            "siblings" => HierarchyRequire::Siblings(self.siblings_body(c, true)?),
            "parents" => HierarchyRequire::Parents {
                output_name: self.arg_classifier(c, "outputName")?,
                entity_fetch: self.opt_fetch(c, "entityFetch")?,
                siblings: self.opt_nested(c, &["siblings"], Self::parse_siblings)?,
                requirements: self.hierarchy_outputs(c)?,
            },
            _ => return Err(self.misplaced(c, EXPECTED)),
        };
        self.close(&call)?;
        Ok(requirement)
    }

    /// `siblings` inside `parents` shares the parents' output and takes no name.
    fn siblings_body(&mut self, call: &mut Call, named: bool) -> Result<Siblings, ParseError> {
        let output_name = match self.next(call)? {
            Next::Value if named => Some(self.arg_classifier(call, "outputName")?),
            Next::Value => {
                return Err(self.unexpected("`entityFetch` or a hierarchy requirement in `siblings` inside `parents`"));
            }
            _ => None,
        };
        Ok(Siblings {
            output_name,
            entity_fetch: self.opt_fetch(call, "entityFetch")?,
            requirements: self.hierarchy_outputs(call)?,
        })
    }

    fn parse_siblings(&mut self) -> Result<Siblings, ParseError> {
        self.nested(Self::siblings)
    }

    fn siblings(&mut self) -> Result<Siblings, ParseError> {
        let mut call = self.open(Category::Require, "`siblings`")?;
        if call.keyword != "siblings" {
            return Err(self.misplaced(&call, "`siblings`"));
        }
        let siblings = self.siblings_body(&mut call, false)?;
        self.close(&call)?;
        Ok(siblings)
    }

    fn hierarchy_outputs(&mut self, call: &mut Call) -> Result<Vec<HierarchyOutputRequire>, ParseError> {
        self.children(call, "requirements", 0, Self::parse_hierarchy_output)
    }

    fn parse_hierarchy_output(&mut self) -> Result<HierarchyOutputRequire, ParseError> {
        self.nested(Self::hierarchy_output)
    }

    fn hierarchy_output(&mut self) -> Result<HierarchyOutputRequire, ParseError> {
        const EXPECTED: &str = "`stopAt` or `statistics`";
        let mut call = self.open(Category::Require, EXPECTED)?;
        let output = match call.keyword {
            "stopAt" => HierarchyOutputRequire::StopAt(self.stop_at_body(&mut call)?),
            "statistics" => self.statistics_body(&mut call)?,
            _ => return Err(self.misplaced(&call, EXPECTED)),
        };
        self.close(&call)?;
        Ok(output)
    }

    /// `statistics(base?, type*)`; a leading base is told apart by name.
    fn statistics_body(&mut self, call: &mut Call) -> Result<HierarchyOutputRequire, ParseError> {
        let mut operands = coerce::flatten(self.arg_values(call, "statisticsType", 0)?);

        let leading = operands
            .first()
            .and_then(|operand| operand.value.as_enum())
            .and_then(StatisticsBase::from_name);
        let base = match leading {
            Some(base) => {
                operands.remove(0);
                base
            }
            None => StatisticsBase::default(),
        };

        let types = coerce::list(
            operands,
            &call.slot("statisticsType"),
            coerce::enumeration::<StatisticsType>,
        )?;

        Ok(HierarchyOutputRequire::Statistics { base, types })
    }

    fn parse_stop_at(&mut self) -> Result<StopAt, ParseError> {
        self.nested(Self::stop_at)
    }

    fn stop_at(&mut self) -> Result<StopAt, ParseError> {
        let mut call = self.open(Category::Require, "`stopAt`")?;
        if call.keyword != "stopAt" {
            return Err(self.misplaced(&call, "`stopAt`"));
        }
        let stop_at = self.stop_at_body(&mut call)?;
        self.close(&call)?;
        Ok(stop_at)
    }

    fn stop_at_body(&mut self, call: &mut Call) -> Result<StopAt, ParseError> {
        self.arg_nested(call, "condition", Self::parse_stop_condition)
    }

    fn parse_stop_condition(&mut self) -> Result<StopAt, ParseError> {
        self.nested(Self::stop_condition)
    }

    fn stop_condition(&mut self) -> Result<StopAt, ParseError> {
        const EXPECTED: &str = "`distance`, `level` or `node`";
        let mut call = self.open(Category::Require, EXPECTED)?;
        let condition = match call.keyword {
            "distance" => StopAt::Distance(self.arg_int(&mut call, "distance")?),
            "level" => StopAt::Level(self.arg_int(&mut call, "level")?),
            "node" => StopAt::Node(self.node_body(&mut call)?),
            _ => return Err(self.misplaced(&call, EXPECTED)),
        };
        self.close(&call)?;
        Ok(condition)
    }

    fn parse_node(&mut self) -> Result<Box<FilterConstraint>, ParseError> {
        self.nested(Self::node)
    }

    fn node(&mut self) -> Result<Box<FilterConstraint>, ParseError> {
        let mut call = self.open(Category::Require, "`node`")?;
        if call.keyword != "node" {
            return Err(self.misplaced(&call, "`node`"));
        }
        let filter = self.node_body(&mut call)?;
        self.close(&call)?;
        Ok(filter)
    }

    /// `node(filterBy(...))`
    fn node_body(&mut self, call: &mut Call) -> Result<Box<FilterConstraint>, ParseError> {
        if !self.next_is(call, &["filterBy"])? {
            if self.next(call)? != Next::End {
                self.separator(call)?;
            }
            return Err(self.missing(call, "filterBy"));
        }
        self.arg_nested(call, "filterBy", Self::parse_filter_child)
    }
}

fn with_parser<'a, T>(
    text: &'a str,
    arguments: &'a Arguments,
    parse: fn(&mut Parser<'a>) -> Result<T, ParseError>,
) -> Result<T, ParseError> {
    let mut parser = Parser::new(Lexer::new(text), arguments)?;
    parse(&mut parser)
}

/// Parses a complete `query(...)`.
///
/// # Examples
///
/// ```
/// use evitaql_parser::{parse_query, Arguments};
///
/// let query = parse_query(
///     "query(collection('product'), filterBy(attributeEquals('code', ?)))",
///     &Arguments::positional(["abc"]),
/// )?;
/// assert_eq!(query.collection(), Some("product"));
/// # Ok::<(), evitaql_parser::ParseError>(())
/// ```
pub fn parse_query(text: &str, arguments: &Arguments) -> Result<Query, ParseError> {
    with_parser(text, arguments, Parser::parse_query)
}

pub fn parse_head_list(text: &str, arguments: &Arguments) -> Result<Vec<HeadConstraint>, ParseError> {
    with_parser(text, arguments, Parser::parse_head_list)
}

/// Parses a comma-separated list of filter constraints.
pub fn parse_filter_list(text: &str, arguments: &Arguments) -> Result<Vec<FilterConstraint>, ParseError> {
    with_parser(text, arguments, Parser::parse_filter_list)
}

pub fn parse_order_list(text: &str, arguments: &Arguments) -> Result<Vec<OrderConstraint>, ParseError> {
    with_parser(text, arguments, Parser::parse_order_list)
}

pub fn parse_require_list(text: &str, arguments: &Arguments) -> Result<Vec<RequireConstraint>, ParseError> {
    with_parser(text, arguments, Parser::parse_require_list)
}

pub fn parse_classifier(text: &str, arguments: &Arguments) -> Result<String, ParseError> {
    with_parser(text, arguments, Parser::parse_classifier)
}

pub fn parse_value(text: &str, arguments: &Arguments) -> Result<Value, ParseError> {
    with_parser(text, arguments, Parser::parse_value)
}
