const REGISTRY_TABLE: Template = Template {
    name: "registry_table",
    text: r#"create table if not exists {{registry}} (
  id serial primary key,
  fetchQuery text not null,
  liveQuery text not null,
  tracked text,
  channel text not null
);"#,
};

// Sorted JSON array of "<id>/<table>" for every row a live query returns.
const SIGNATURE_FUNCTION: Template = Template {
    name: "signature_function",
    text: r#"create or replace function {{signature}}(query text) returns text as $signature$
declare
  result text;
begin
  execute format(
    'select coalesce(jsonb_agg(refs.row_identity order by refs.row_identity), ''[]''::jsonb)::text
     from (select live.id::text || ''/'' || live."table" as row_identity from (%s) as live) as refs',
    query
  ) into result;
  return result;
end;
$signature$ language plpgsql;"#,
};

// Row ids of a live query, in its order. Every live query row carries an
// "id" label whatever the fetch query projects.
const FETCHED_FUNCTION: Template = Template {
    name: "fetched_function",
    text: r#"create or replace function {{fetched}}(query text) returns jsonb as $fetched$
declare
  result jsonb;
begin
  execute format(
    'select coalesce(jsonb_agg(to_jsonb(live.id)), ''[]''::jsonb) from (%s) as live',
    query
  ) into result;
  return result;
end;
$fetched$ language plpgsql;"#,
};

const REGISTRY_FUNCTION: Template = Template {
    name: "registry_function",
    text: r#"create or replace function {{function}}() returns trigger as $trigger$
begin
  NEW.tracked := {{signature}}(NEW.liveQuery);
  return NEW;
end;
$trigger$ language plpgsql;"#,
};

const REGISTRY_TRIGGER: Template = Template {
    name: "registry_trigger",
    text: r#"create trigger {{trigger}}
  before insert or update on {{registry}}
  for each row
  execute procedure {{function}}();"#,
};

// Shared by insert/update (row = new) and delete (row = old).
const ROW_EVENT_FUNCTION: Template = Template {
    name: "row_event_function",
    text: r#"create or replace function {{function}}() returns trigger as $trigger$
declare
  registration record;
  row_identity text := {{row}}.{{id_column}}::text || '/' || TG_TABLE_NAME;
  tracked_identities jsonb;
  affected boolean;
  fetched jsonb;
begin
  for registration in select * from {{registry}} order by id loop
    tracked_identities := coalesce(nullif(registration.tracked, ''), '[]')::jsonb;
    affected := tracked_identities ? row_identity;
    -- An update may move a tracked row to a new id.
    if not affected and TG_OP = 'UPDATE' then
      affected := tracked_identities ? (old.{{id_column}}::text || '/' || TG_TABLE_NAME);
    end if;
    if not affected then
      execute format(
        'select exists (select 1 from (%s) as live where live.id::text = $1 and live."table" = $2)',
        registration.liveQuery
      ) into affected using {{row}}.{{id_column}}::text, TG_TABLE_NAME::text;
    end if;
    if affected then
      fetched := {{fetched}}(registration.liveQuery);
      update {{registry}} set tracked = '' where id = registration.id;
      perform pg_notify(
        registration.channel,
        json_build_object(
          'table', TG_TABLE_NAME,
          'id', {{row}}.{{id_column}},
          'query', registration.id,
          'fetched', fetched,
          'event', TG_OP
        )::text
      );
    end if;
  end loop;
  return {{row}};
end;
$trigger$ language plpgsql;"#,
};

const TRUNCATE_FUNCTION: Template = Template {
    name: "truncate_function",
    text: r#"create or replace function {{function}}() returns trigger as $trigger$
declare
  registration record;
  previous text;
  signature text;
  affected boolean;
  fetched jsonb;
begin
  for registration in select * from {{registry}} order by id loop
    previous := nullif(registration.tracked, '');
    signature := {{signature}}(registration.liveQuery);
    affected := previous is null or signature = '[]' or signature <> previous;
    if not affected then
      affected := exists (
        select 1 from jsonb_array_elements_text(previous::jsonb) as refs(row_identity)
        where right(refs.row_identity, length(TG_TABLE_NAME) + 1) = '/' || TG_TABLE_NAME
      );
    end if;
    if affected then
      fetched := {{fetched}}(registration.liveQuery);
      update {{registry}} set tracked = '' where id = registration.id;
      perform pg_notify(
        registration.channel,
        json_build_object(
          'table', TG_TABLE_NAME,
          'query', registration.id,
          'fetched', fetched,
          'event', TG_OP
        )::text
      );
    end if;
  end loop;
  return null;
end;
$trigger$ language plpgsql;"#,
};

const INSERT_UPDATE_TRIGGER: Template = Template {
    name: "insert_update_trigger",
    text: r#"create trigger {{trigger}}
  after insert or update on {{table}}
  for each row
  execute procedure {{function}}();"#,
};

const DELETE_TRIGGER: Template = Template {
    name: "delete_trigger",
    text: r#"create trigger {{trigger}}
  after delete on {{table}}
  for each row
  execute procedure {{function}}();"#,
};

const TRUNCATE_TRIGGER: Template = Template {
    name: "truncate_trigger",
    text: r#"create trigger {{trigger}}
  after truncate on {{table}}
  for each statement
  execute procedure {{function}}();"#,
};

const DROP_FUNCTION: Template = Template {
    name: "drop_function",
    text: "drop function if exists {{function}} cascade;",
};

const DROP_TRIGGER: Template = Template {
    name: "drop_trigger",
    text: "drop trigger if exists {{trigger}} on {{table}};",
};

const DROP_TABLE: Template = Template {
    name: "drop_table",
    text: "drop table if exists {{table}};",
};
